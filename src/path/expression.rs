use crate::error::PathError;
use std::fmt;

/// Token for an explicit null slot.
pub const NULL_TOKEN: &str = "%null%";
/// Token for an explicit skipped slot.
pub const SKIP_TOKEN: &str = "%%";

/// A parsed, normalized path expression.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum AbsolutePath {
    /// The empty path: every element of the data array.
    MatchAll,
    /// `%null%`
    Null,
    /// `%%`
    Skip,
    /// `%<index>%[.<relative>]`
    Indexed { index: usize, relative: String },
}

impl AbsolutePath {
    pub fn parse(path: &str) -> Result<Self, PathError> {
        match path {
            "" => return Ok(AbsolutePath::MatchAll),
            NULL_TOKEN => return Ok(AbsolutePath::Null),
            SKIP_TOKEN => return Ok(AbsolutePath::Skip),
            _ => {}
        }

        let rest = path
            .strip_prefix('%')
            .ok_or_else(|| PathError::NotAnchored(path.to_string()))?;
        let (index, tail) = rest
            .split_once('%')
            .ok_or_else(|| PathError::UnterminatedAnchor(path.to_string()))?;
        let index = index
            .parse::<usize>()
            .map_err(|_| PathError::MalformedIndex {
                path: path.to_string(),
                index: index.to_string(),
            })?;
        let relative = tail.strip_prefix('.').unwrap_or(tail);

        Ok(AbsolutePath::Indexed {
            index,
            relative: relative.to_string(),
        })
    }

    /// The index and relative path, for indexed paths only.
    pub fn indexed(&self) -> Option<(usize, &str)> {
        match self {
            AbsolutePath::Indexed { index, relative } => Some((*index, relative)),
            _ => None,
        }
    }
}

impl fmt::Display for AbsolutePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AbsolutePath::MatchAll => Ok(()),
            AbsolutePath::Null => write!(f, "{}", NULL_TOKEN),
            AbsolutePath::Skip => write!(f, "{}", SKIP_TOKEN),
            AbsolutePath::Indexed { index, relative } if relative.is_empty() => {
                write!(f, "%{}%", index)
            }
            AbsolutePath::Indexed { index, relative } => write!(f, "%{}%.{}", index, relative),
        }
    }
}
