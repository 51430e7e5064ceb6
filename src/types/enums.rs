use std::fmt;

use serde::{Deserialize, Serialize};

/// Layout a saved view renders with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewType {
    #[default]
    Table,
    Kanban,
}

impl ViewType {
    pub fn parse(s: &str) -> Option<ViewType> {
        match s {
            "table" => Some(Self::Table),
            "kanban" => Some(Self::Kanban),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Table => "table",
            Self::Kanban => "kanban",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    pub fn parse(s: &str) -> Option<SortDirection> {
        match s {
            "asc" => Some(Self::Asc),
            "desc" => Some(Self::Desc),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }
}

/// How the filters inside a filter group combine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum LogicalOperator {
    #[default]
    And,
    Or,
    Not,
}

impl LogicalOperator {
    pub fn parse(s: &str) -> Option<LogicalOperator> {
        match s {
            "AND" => Some(Self::And),
            "OR" => Some(Self::Or),
            "NOT" => Some(Self::Not),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::And => "AND",
            Self::Or => "OR",
            Self::Not => "NOT",
        }
    }
}

impl fmt::Display for ViewType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for SortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for LogicalOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_view_type() {
        assert_eq!(ViewType::parse("table"), Some(ViewType::Table));
        assert_eq!(ViewType::parse("kanban"), Some(ViewType::Kanban));
        assert_eq!(ViewType::parse("calendar"), None);
    }

    #[test]
    fn test_parse_is_case_sensitive() {
        assert_eq!(SortDirection::parse("ASC"), None);
        assert_eq!(LogicalOperator::parse("and"), None);
        assert_eq!(LogicalOperator::parse("OR"), Some(LogicalOperator::Or));
    }

    #[test]
    fn test_as_str_matches_parse() {
        for op in [LogicalOperator::And, LogicalOperator::Or, LogicalOperator::Not] {
            assert_eq!(LogicalOperator::parse(op.as_str()), Some(op));
        }
        assert_eq!(SortDirection::Desc.to_string(), "desc");
    }
}
