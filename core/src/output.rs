use strum_macros::{Display, EnumString};

/// How command results are printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, EnumString, Display)]
#[strum(serialize_all = "lowercase")]
pub enum OutputMode {
    /// Formatted tables for a terminal.
    #[default]
    Table,
    /// Structured JSON for scripts.
    Json,
}

impl OutputMode {
    pub fn is_machine_readable(self) -> bool {
        self == OutputMode::Json
    }
}
