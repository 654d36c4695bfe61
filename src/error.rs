use ggez::GameError;
use std::fmt::{self, Display, Formatter};
use std::result;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// Every cell of the board is taken by the snake or an obstacle
    NoFreeCell,
}

impl Display for Error {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Error::NoFreeCell => write!(f, "no free cell left to place food on"),
        }
    }
}

impl std::error::Error for Error {}

impl From<Error> for GameError {
    fn from(e: Error) -> Self {
        GameError::CustomError(e.to_string())
    }
}

pub type Result<T = ()> = result::Result<T, Error>;
