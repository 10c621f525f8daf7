//! # Errors Module
//!
//! This module defines the errors that can happen during execution, only as
//! a result of a reason specific to this project. Some examples of this are:
//!
//! - A malformed arena file passed to the loader.
//! - A partial-solver variant name that does not match any offering.
//!
//! #### Authorship
//!
//! - Max Fierro, 11/2/2023 (maxfierro@berkeley.edu)

use crate::utils::most_similar;
use std::{error::Error, fmt};

/* RESOURCE NOT FOUND ERRORS */

/// Indicates that a resource which the user specified was not found or does
/// not exist. This can be a partial-solver variant, a file, etc.
#[derive(Debug)]
pub enum NotFoundError
{
    /// An error to indicate that a user input the name of a partial-solver
    /// variant which is not implemented. Supports telling the user what they
    /// typed and a suggestion.
    PartialVariant
    {
        requested: String,
        available: Vec<String>,
    },
}

/// Indicates that a partial-solver variant was requested on a
/// multi-dimension arena, but that variant has no generalized counterpart.
#[derive(Debug)]
pub struct NoGeneralizedVariant
{
    pub requested: String,
}

/// Indicates that the backward safety-game algorithm was requested on an
/// arena with more than one priority function; it only handles the
/// single-dimension case.
#[derive(Debug)]
pub struct BackwardRequiresSingleDimension
{
    pub dimension: usize,
}

impl Error for BackwardRequiresSingleDimension {}

impl fmt::Display for BackwardRequiresSingleDimension
{
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result
    {
        write!(
            f,
            "The backward algorithm only solves single-dimension arenas, \
            but this one declares {} priority functions. Use --algorithm \
            zielonka instead.",
            self.dimension
        )
    }
}

impl Error for NoGeneralizedVariant {}

impl fmt::Display for NoGeneralizedVariant
{
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result
    {
        write!(
            f,
            "The partial solver '{}' has no generalized counterpart. Only \
            'psol-b', 'psol-q', and 'psol-c' do; pick one of those for \
            multi-dimension arenas.",
            self.requested
        )
    }
}

impl Error for NotFoundError {}

impl fmt::Display for NotFoundError
{
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result
    {
        match self {
            Self::PartialVariant { requested, available } => {
                write!(
                    f,
                    "The partial solver '{}' was not found among the \
                    offerings. Perhaps you meant '{}'? Run 'gpsolve \
                    list-partials' to see all of them.",
                    requested,
                    most_similar(
                        requested,
                        available.iter().map(|s| &s[0..]).collect()
                    )
                )
            }
        }
    }
}

/* ARENA LOAD ERRORS */

/// Indicates that an arena text file could not be parsed into an in-memory
/// [`crate::arena::Arena`].
#[derive(Debug)]
pub enum LoadError
{
    /// A line could not be parsed at all (wrong number of fields, or a field
    /// that was not the kind of token expected in that position).
    Malformed
    {
        line: usize, content: String,
    },

    /// A vertex referenced a successor that was never itself declared as a
    /// vertex of the arena.
    UnknownSuccessor
    {
        vertex: u32, successor: u32,
    },

    /// Two vertices declared priority vectors of different arity.
    InconsistentArity
    {
        vertex: u32, expected: usize, found: usize,
    },

    /// A vertex had no outgoing edges at all, violating the no-dead-ends
    /// invariant of the data model.
    DeadEnd
    {
        vertex: u32,
    },

    /// The owner token for a vertex was not `0` or `1`.
    InvalidOwner
    {
        vertex: u32, token: String,
    },
}

impl Error for LoadError {}

impl fmt::Display for LoadError
{
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result
    {
        match self {
            Self::Malformed { line, content } => {
                write!(
                    f,
                    "Could not parse line {}: '{}'. Expected '<id> \
                    <priority> <owner> <successors>'.",
                    line, content
                )
            },
            Self::UnknownSuccessor { vertex, successor } => {
                write!(
                    f,
                    "Vertex {} lists successor {}, which was never declared \
                    as a vertex of the arena.",
                    vertex, successor
                )
            },
            Self::InconsistentArity { vertex, expected, found } => {
                write!(
                    f,
                    "Vertex {} has a priority vector of arity {}, but an \
                    earlier vertex had arity {}. All priority vectors must \
                    share the same arity.",
                    vertex, found, expected
                )
            },
            Self::DeadEnd { vertex } => {
                write!(
                    f,
                    "Vertex {} has no outgoing edges. Every vertex of an \
                    arena must have at least one successor.",
                    vertex
                )
            },
            Self::InvalidOwner { vertex, token } => {
                write!(
                    f,
                    "Vertex {} has owner token '{}', which is neither '0' \
                    nor '1'.",
                    vertex, token
                )
            },
        }
    }
}
