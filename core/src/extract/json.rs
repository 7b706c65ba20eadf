use crate::scan::{scan, Literal, Token};

use super::targets::{Target, Targets};

/// Which top-level section of a JSON-like file holds the targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JsonSection {
    /// `"scripts": { "name": "body", ... }` (package.json).
    Scripts,
    /// `"tasks": [ { "label": "name", ... }, ... ]` (tasks.json).
    TaskList,
}

impl JsonSection {
    fn key(self) -> &'static str {
        match self {
            JsonSection::Scripts => "scripts",
            JsonSection::TaskList => "tasks",
        }
    }
}

/// Result of one extraction pass.
#[derive(Debug, Clone, Default)]
pub struct Extraction {
    pub targets: Targets,
    /// Offset reported by the scanner when the text was malformed.
    pub syntax_error: Option<usize>,
}

/// Target extraction state machine.
///
/// `depth` counts open containers before the token being processed, so the
/// root object's properties sit at depth 1.
struct Machine {
    section: JsonSection,
    depth: usize,
    pending_key: Option<(String, usize)>,
    scripts_depth: Option<usize>,
    task_list_depth: Option<usize>,
    task_depth: Option<usize>,
    anchor: usize,
    pending_label: bool,
    targets: Targets,
}

impl Machine {
    fn new(section: JsonSection) -> Self {
        Self {
            section,
            depth: 0,
            pending_key: None,
            scripts_depth: None,
            task_list_depth: None,
            task_depth: None,
            anchor: 0,
            pending_label: false,
            targets: Targets::new(),
        }
    }

    fn in_scripts(&self) -> bool {
        self.scripts_depth == Some(self.depth)
    }

    fn in_task(&self) -> bool {
        self.task_depth == Some(self.depth)
    }

    /// Root-level property that opens the configured section.
    fn opens_section(&self) -> bool {
        self.depth == 1
            && self
                .pending_key
                .as_ref()
                .is_some_and(|(k, _)| k == self.section.key())
    }

    fn feed(&mut self, token: Token) {
        match token {
            Token::ObjectStart(offset) => {
                self.pending_label = false;
                if self.section == JsonSection::Scripts
                    && self.scripts_depth.is_none()
                    && self.opens_section()
                {
                    self.scripts_depth = Some(self.depth + 1);
                }
                if self.task_list_depth == Some(self.depth) {
                    self.task_depth = Some(self.depth + 1);
                    self.anchor = offset;
                }
                self.pending_key = None;
                self.depth += 1;
            }
            Token::ObjectEnd(_) => {
                if self.in_scripts() {
                    self.scripts_depth = None;
                }
                if self.in_task() {
                    self.task_depth = None;
                    self.pending_label = false;
                }
                self.pending_key = None;
                self.depth = self.depth.saturating_sub(1);
            }
            Token::ArrayStart(_) => {
                self.pending_label = false;
                if self.section == JsonSection::TaskList
                    && self.task_list_depth.is_none()
                    && self.opens_section()
                {
                    self.task_list_depth = Some(self.depth + 1);
                    if let Some((_, offset)) = &self.pending_key {
                        self.anchor = *offset;
                    }
                }
                self.pending_key = None;
                self.depth += 1;
            }
            Token::ArrayEnd(_) => {
                if self.task_list_depth == Some(self.depth) {
                    self.task_list_depth = None;
                    self.task_depth = None;
                }
                self.pending_key = None;
                self.depth = self.depth.saturating_sub(1);
            }
            Token::PropertyName(name, offset) => {
                self.pending_label = self.in_task() && name == "label";
                self.pending_key = Some((name, offset));
            }
            Token::Literal(value, _) => {
                let key = self.pending_key.take();
                if self.in_scripts() {
                    if let (Some((name, offset)), Literal::String(body)) = (key, &value) {
                        self.targets.insert(Target::new(name, offset).with_value(body.clone()));
                    }
                } else if self.pending_label && self.in_task() {
                    if let Some(label) = value.into_string() {
                        self.targets.insert(Target::new(label, self.anchor));
                    }
                }
                self.pending_label = false;
            }
            Token::Error(_) => {}
        }
    }
}

/// Extracts targets from one JSON-like document.
///
/// Never fails: a syntax error stops the pass and whatever was bound before
/// it is returned.
pub fn extract_json(text: &str, section: JsonSection) -> Extraction {
    let mut machine = Machine::new(section);
    let mut syntax_error = None;

    for token in scan(text) {
        if let Token::Error(offset) = token {
            syntax_error = Some(offset);
            break;
        }
        machine.feed(token);
    }

    Extraction {
        targets: machine.targets,
        syntax_error,
    }
}

/// Targets of the top-level `"scripts"` object.
pub fn extract_scripts(text: &str) -> Targets {
    extract_json(text, JsonSection::Scripts).targets
}

/// Targets named by `"label"` entries of the top-level `"tasks"` array.
pub fn extract_task_labels(text: &str) -> Targets {
    extract_json(text, JsonSection::TaskList).targets
}
