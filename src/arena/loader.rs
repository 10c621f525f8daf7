//! # Arena Loader Module
//!
//! Parses the textual arena format into an in-memory [`Arena`]. This is
//! ambient I/O rather than part of the core solving engine, but a solver
//! crate needs some way to get an arena from disk into memory, so a
//! small, direct-coded parser lives here rather than in the engine.
//!
//! Grammar (whitespace-separated fields, comma-separated within a field):
//!
//! ```text
//! <id> <priority> <owner> <successor-id>[,<successor-id>...][;]
//! ```
//!
//! where `<priority>` is a single non-negative integer for single-dimension
//! arenas, or a comma-separated `<p_1>,...,<p_k>` tuple for generalized
//! ones. Leading lines that do not match this shape (e.g. a PGSolver-style
//! `parity <N>;` header) are treated as comments and ignored.
//!
//! #### Authorship
//!
//! - Max Fierro, 4/6/2023 (maxfierro@berkeley.edu)

use crate::arena::{Arena, Player, Priority, VertexId};
use crate::errors::LoadError;
use regex::Regex;
use std::collections::BTreeMap;

/// The shape a well-formed vertex line must match, checked before any
/// field is individually parsed: an id, a comma-separated priority tuple,
/// an owner token, and an optional comma-separated successor list.
const ROW_PATTERN: &str = r"^\d+\s+\d+(,\d+)*\s+[01](\s+\d+(,\d+)*)?$";

/// Parses `text` into an [`Arena`]. See the module documentation for the
/// accepted grammar.
pub fn load_str(text: &str) -> Result<Arena, LoadError> {
    let row_re = Regex::new(ROW_PATTERN).unwrap();
    let mut rows: Vec<Row> = Vec::new();

    for (lineno, raw) in text.lines().enumerate() {
        let line = raw.trim().trim_end_matches(';').trim();
        if line.is_empty() {
            continue;
        }
        let fields: Vec<&str> = line.split_whitespace().collect();
        // A header/comment line (e.g. a PGSolver-style `parity 10;`) never
        // starts with a vertex id, so it is recognized independently of
        // where in the file it appears, rather than only before the first
        // successfully parsed row: a malformed line cannot hide behind a
        // "still looking for the first vertex" exemption just because it
        // comes first.
        let Some(&first) = fields.first() else { continue };
        if first.parse::<u32>().is_err() {
            continue;
        }
        if let [id, _priorities, owner, ..] = fields.as_slice() {
            if *owner != "0" && *owner != "1" {
                return Err(LoadError::InvalidOwner {
                    vertex: id.parse().unwrap_or_default(),
                    token: (*owner).to_string(),
                });
            }
        }
        if !row_re.is_match(line) {
            return Err(LoadError::Malformed { line: lineno + 1, content: raw.to_string() });
        }
        match parse_row(line) {
            Some(row) => rows.push(row),
            None => {
                return Err(LoadError::Malformed { line: lineno + 1, content: raw.to_string() })
            },
        }
    }

    build_arena(rows)
}

/// One parsed, not-yet-validated vertex declaration.
struct Row {
    id: u32,
    priorities: Vec<Priority>,
    owner: Player,
    successors: Vec<u32>,
}

fn parse_row(line: &str) -> Option<Row> {
    let fields: Vec<&str> = line.split_whitespace().collect();
    // A line with exactly 3 fields declares a vertex with no successors at
    // all: the grammar's fourth field is simply absent. This is kept
    // distinct from a malformed line so the loader can report it as a
    // dead end rather than a parse failure.
    if fields.len() != 4 && fields.len() != 3 {
        return None;
    }
    let id: u32 = fields[0].parse().ok()?;
    let priorities: Vec<Priority> =
        fields[1].split(',').map(|p| p.parse().ok()).collect::<Option<_>>()?;
    if priorities.is_empty() {
        return None;
    }
    let owner_token = fields[2];
    let owner = match owner_token {
        "0" => Player::Even,
        "1" => Player::Odd,
        _ => return None,
    };
    let successors: Vec<u32> = if fields.len() == 4 {
        fields[3].split(',').map(|s| s.parse().ok()).collect::<Option<_>>()?
    } else {
        Vec::new()
    };
    Some(Row { id, priorities, owner, successors })
}

fn build_arena(rows: Vec<Row>) -> Result<Arena, LoadError> {
    // External ids map to dense local indices in ascending order, so
    // iteration over `vertices()` is reproducible regardless of the order
    // vertices were declared in the file.
    let mut ids: Vec<u32> = rows.iter().map(|r| r.id).collect();
    ids.sort_unstable();
    ids.dedup();
    let index_of: BTreeMap<u32, VertexId> = ids
        .iter()
        .enumerate()
        .map(|(i, &id)| (id, i as VertexId))
        .collect();

    let n = ids.len();
    let mut owner = vec![Player::Even; n];
    let mut priority: Vec<Vec<Priority>> = vec![Vec::new(); n];
    let mut successors: Vec<Vec<VertexId>> = vec![Vec::new(); n];
    let mut filled = vec![false; n];
    let dimension = rows.first().map(|r| r.priorities.len()).unwrap_or(1);

    for row in rows {
        let idx = index_of[&row.id] as usize;
        if row.priorities.len() != dimension {
            return Err(LoadError::InconsistentArity {
                vertex: row.id,
                expected: dimension,
                found: row.priorities.len(),
            });
        }
        let mut succ = Vec::with_capacity(row.successors.len());
        for s in row.successors {
            match index_of.get(&s) {
                Some(&local) => succ.push(local),
                None => {
                    return Err(LoadError::UnknownSuccessor {
                        vertex: row.id,
                        successor: s,
                    })
                },
            }
        }
        owner[idx] = row.owner;
        priority[idx] = row.priorities;
        successors[idx] = succ;
        filled[idx] = true;
    }

    for (idx, ok) in filled.into_iter().enumerate() {
        if !ok || successors[idx].is_empty() {
            return Err(LoadError::DeadEnd { vertex: ids[idx] });
        }
    }

    Ok(Arena::new(owner, priority, successors, ids))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn row_pattern_compiles_and_matches_a_well_formed_line() {
        let re = Regex::new(ROW_PATTERN).unwrap();
        assert!(re.is_match("0 3 0 1,2"));
        assert!(re.is_match("0 1,2 0 1"));
        assert!(re.is_match("1 2 1"));
        assert!(!re.is_match("0 3 0 1,"));
        assert!(!re.is_match("not a row"));
    }

    #[test]
    fn loads_single_dimension_arena() {
        let text = "\
            parity 3;\n\
            0 3 0 1,2;\n\
            1 2 1 0;\n\
            2 4 0 1;\n";
        let g = load_str(text).unwrap();
        assert_eq!(g.len(), 3);
        assert_eq!(g.dimension(), 1);
        let v0 = g.vertices().find(|&v| g.label(v) == 0).unwrap();
        assert_eq!(g.priority1(v0), 3);
        assert_eq!(g.owner(v0), Player::Even);
        assert_eq!(g.successors(v0).len(), 2);
    }

    #[test]
    fn loads_generalized_arena() {
        let text = "0 1,2 0 1;\n1 2,1 1 0;\n";
        let g = load_str(text).unwrap();
        assert_eq!(g.dimension(), 2);
        let v0 = g.vertices().find(|&v| g.label(v) == 0).unwrap();
        assert_eq!(g.priority(v0), &[1, 2]);
    }

    #[test]
    fn rejects_dead_end() {
        let text = "0 1 0 1;\n1 2 1;\n";
        match load_str(text) {
            Err(LoadError::DeadEnd { vertex: 1 }) => {},
            other => panic!("expected DeadEnd, got {other:?}"),
        }
    }

    #[test]
    fn rejects_unknown_successor() {
        let text = "0 1 0 5;\n";
        match load_str(text) {
            Err(LoadError::UnknownSuccessor { vertex: 0, successor: 5 }) => {},
            other => panic!("expected UnknownSuccessor, got {other:?}"),
        }
    }

    #[test]
    fn rejects_inconsistent_arity() {
        let text = "0 1,2 0 1;\n1 3 1 0;\n";
        match load_str(text) {
            Err(LoadError::InconsistentArity { .. }) => {},
            other => panic!("expected InconsistentArity, got {other:?}"),
        }
    }

    #[test]
    fn rejects_invalid_owner_even_on_the_first_line() {
        let text = "0 1 2 1;\n";
        match load_str(text) {
            Err(LoadError::InvalidOwner { vertex: 0, token }) => assert_eq!(token, "2"),
            other => panic!("expected InvalidOwner, got {other:?}"),
        }
    }
}
