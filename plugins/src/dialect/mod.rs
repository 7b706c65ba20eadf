//! Built-in task dialects.

mod ant;
mod gradle;
mod grunt;
mod gulp;
mod make;
mod npm;
mod script;
mod workspace;

use std::sync::OnceLock;

use regex::Regex;
use taskdeck_core::api::{Target, Targets};

pub use ant::AntDialect;
pub use gradle::GradleDialect;
pub use grunt::GruntDialect;
pub use gulp::GulpDialect;
pub use make::MakeDialect;
pub use npm::NpmDialect;
pub use script::ScriptDialect;
pub use workspace::WorkspaceTasksDialect;

/// Compiles a fixed pattern once.
pub(crate) fn cached_regex(cell: &'static OnceLock<Regex>, pattern: &str) -> &'static Regex {
    cell.get_or_init(|| Regex::new(pattern).expect("built-in pattern must compile"))
}

/// One target per match, named by the first participating capture group.
pub(crate) fn regex_targets(re: &Regex, text: &str) -> Targets {
    let mut targets = Targets::new();
    for caps in re.captures_iter(text) {
        if let Some(m) = caps.iter().skip(1).flatten().next() {
            targets.insert(Target::new(m.as_str(), m.start()));
        }
    }
    targets
}
