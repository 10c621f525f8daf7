//! # Utilities Module
//!
//! This module factors out common behavior across this project.
//!
//! #### Authorship
//!
//! - Max Fierro, 4/9/2023 (maxfierro@berkeley.edu)

/* ALGORITHMS */

/// Returns the most similar string to `model` in the vector `all`. Used for
/// checking user input against offerings to provide useful suggestions for
/// malformed command arguments. Assumes that `all` is not empty.
pub fn most_similar(model: &str, all: Vec<&str>) -> String {
    all.iter()
        .min_by(|s1, s2| {
            let d1 = strsim::damerau_levenshtein(model, s1);
            let d2 = strsim::damerau_levenshtein(model, s2);
            d1.cmp(&d2)
        })
        .unwrap()[..]
        .to_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn most_similar_finds_closest_match() {
        let offerings = vec!["psolb", "psolq", "psolc", "zielonka"];
        assert_eq!(most_similar("psolB", offerings.clone()), "psolb");
        assert_eq!(most_similar("zielonk", offerings), "zielonka");
    }
}
