use taskdeck_core::api::{line_offsets, ConfigFile, Dialect, RunnerSpec, Target, Targets};

/// Explicit rules of Makefiles, run with `make <target>`.
pub struct MakeDialect;

impl Dialect for MakeDialect {
    fn id(&self) -> &str {
        "make"
    }

    fn file_globs(&self) -> &[&'static str] {
        &["**/Makefile", "**/GNUmakefile", "**/*.mk"]
    }

    fn default_runner(&self) -> RunnerSpec {
        RunnerSpec::new("make")
    }

    fn extract(&self, text: &str, _file: &ConfigFile) -> Targets {
        let mut targets = Targets::new();
        for (offset, line) in line_offsets(text) {
            for (at, name) in rule_targets(line) {
                targets.insert(Target::new(name, offset + at));
            }
        }
        targets
    }
}

/// Targets declared by one rule line, with their byte positions in the line.
fn rule_targets(line: &str) -> Vec<(usize, &str)> {
    if line.starts_with(|c: char| c.is_whitespace() || c == '#') {
        return Vec::new();
    }

    let Some(colon) = line.find(':') else {
        return Vec::new();
    };
    let head = &line[..colon];
    let rest = &line[colon + 1..];

    // `:=`, `::=` and plain `=` assignments.
    if head.contains('=') || rest.starts_with('=') || rest.starts_with(":=") {
        return Vec::new();
    }

    let mut names = Vec::new();
    let mut pos = 0;
    for word in head.split_whitespace() {
        let at = pos + head[pos..].find(word).unwrap_or(0);
        pos = at + word.len();
        if word.starts_with('.') || word.contains('%') || word.contains('$') {
            continue;
        }
        names.push((at, word));
    }
    names
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use taskdeck_core::api::WorkspaceFolder;

    fn file() -> ConfigFile {
        ConfigFile::new("/repo/Makefile", WorkspaceFolder::new("repo", "/repo"))
    }

    #[test]
    fn extracts_explicit_rules() {
        let text = "\
CC := gcc
PREFIX = /usr/local
.PHONY: all clean
all: build
\t$(CC) -o app main.c
build test: deps
%.o: %.c
\t$(CC) -c $<
$(OUT): x
install:: all
clean:
\trm -f app
# docs: not a rule
";
        let targets = MakeDialect.extract(text, &file());
        assert_eq!(targets.names(), vec!["all", "build", "test", "install", "clean"]);
        assert_eq!(targets.get("all").unwrap().source_offset, text.find("all:").unwrap());
        assert_eq!(targets.get("test").unwrap().source_offset, text.find("test:").unwrap());
    }

    #[test]
    fn crlf_files_keep_offsets() {
        let text = "a:\r\nb: a\r\n";
        let targets = MakeDialect.extract(text, &file());
        assert_eq!(targets.names(), vec!["a", "b"]);
        assert_eq!(targets.get("b").unwrap().source_offset, 4);
    }

    #[test]
    fn simple_expansion_assignment_is_not_a_rule() {
        let targets = MakeDialect.extract("X ::= 1\nY != date\n", &file());
        assert!(targets.is_empty());
    }
}
