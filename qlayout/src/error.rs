use std::fmt::{Debug, Display};
use std::path::PathBuf;

use arcstr::ArcStr;
use thiserror::Error;

use crate::component::Category;

pub type Result<T> = std::result::Result<T, QlayoutError>;

pub struct QlayoutError {
    pub(crate) source: ErrorSource,
    pub(crate) context: Vec<ErrorContext>,
}

impl QlayoutError {
    pub fn source(&self) -> &ErrorSource {
        &self.source
    }
}

impl std::error::Error for QlayoutError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.source)
    }
}

impl Display for QlayoutError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Error:\n{}", self.source)?;
        if !self.context.is_empty() {
            writeln!(f, "\nError occurred:")?;
            for item in self.context.iter() {
                writeln!(f, "\twhile {}", item)?;
            }
        }
        Ok(())
    }
}

impl Debug for QlayoutError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self.source)?;
        if !self.context.is_empty() {
            writeln!(f, "\nError occurred:")?;
            for (i, item) in self.context.iter().enumerate() {
                writeln!(f, "\t{}: {:?}", i, item)?;
            }
        }
        Ok(())
    }
}

impl<T> From<T> for QlayoutError
where
    T: Into<ErrorSource>,
{
    fn from(value: T) -> Self {
        Self {
            source: value.into(),
            context: Vec::new(),
        }
    }
}

impl QlayoutError {
    pub fn new(source: impl Into<ErrorSource>) -> Self {
        Self {
            source: source.into(),
            context: Vec::new(),
        }
    }

    pub fn with_context(mut self, ctx: impl Into<ErrorContext>) -> Self {
        self.context.push(ctx.into());
        self
    }

    #[inline]
    pub fn into_inner(self) -> ErrorSource {
        self.source
    }

    /// The context frames, innermost first.
    #[inline]
    pub fn context(&self) -> &[ErrorContext] {
        &self.context
    }
}

#[inline]
pub fn with_err_context<T, E, C>(result: std::result::Result<T, E>, ctx: C) -> Result<T>
where
    C: FnOnce() -> ErrorContext,
    E: Into<QlayoutError>,
{
    result.map_err(|err| err.into().with_context(ctx()))
}

#[derive(Debug, Clone, Eq, PartialEq)]
#[non_exhaustive]
pub enum ErrorContext {
    CompleteComponent {
        category: Category,
        name: ArcStr,
    },
    DrawComponent {
        category: Category,
        name: ArcStr,
    },
    InjectCategory(ArcStr),
    ResolveBranch(&'static str),
    CreateDir(PathBuf),
    CreateFile(PathBuf),
    ReadFile(PathBuf),
    Task(ArcStr),
}

impl Display for ErrorContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        use ErrorContext::*;
        match self {
            CompleteComponent { category, name } => {
                write!(f, "completing options of {category} entry {name}")
            }
            DrawComponent { category, name } => write!(f, "drawing {category} entry {name}"),
            InjectCategory(category) => write!(f, "injecting category {category}"),
            ResolveBranch(branch) => write!(f, "resolving {branch} request"),
            CreateDir(path) => write!(f, "creating directory {path:?}"),
            CreateFile(path) => write!(f, "creating file {path:?}"),
            ReadFile(path) => write!(f, "reading file {path:?}"),
            Task(task) => write!(f, "{task}"),
        }
    }
}

#[derive(Error, Debug)]
#[non_exhaustive]
pub enum ErrorSource {
    #[error("no {branch} generator accepts parameter signature `{signature}`")]
    SignatureResolution {
        branch: &'static str,
        signature: ArcStr,
    },

    #[error("{component} is missing required field `{field}`")]
    MissingField { component: ArcStr, field: ArcStr },

    #[error("layout has a degenerate bounding box ({width} x {height})")]
    GeometryDegenerate { width: f64, height: f64 },

    #[error("expected {a} and {b} to intersect, but they do not")]
    IntersectionExpectedButNotFound { a: ArcStr, b: ArcStr },

    #[error("duplicate name `{name}` in category {category}")]
    DuplicateName { category: Category, name: ArcStr },

    #[error("{component} has unsupported type {type_name} for this operation")]
    UnsupportedShape { component: ArcStr, type_name: ArcStr },

    #[error("topology positions {a:?} and {b:?} are not unit-adjacent")]
    NotAdjacent { a: (i64, i64), b: (i64, i64) },

    #[error("invalid option: {0}")]
    InvalidOption(String),

    #[error("not found: {0}")]
    NotFound(ArcStr),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("error converting options: {0}")]
    Json(#[from] serde_json::Error),

    #[error("error parsing TOML: {0}")]
    TomlParsing(#[from] toml::de::Error),

    #[error("error parsing design literal: {0}")]
    Literal(#[from] optlit::error::Error),

    #[error("error writing GDS: {0}")]
    Gds(String),
}
