use crate::board::error::OptionError;
use crate::board::RepetitionScope;
use crate::board::MAX_PLY;

/// Tunables for a search instance.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SearchParams {
    /// Transposition table size in MiB
    pub hash_mb: usize,
    pub use_transposition_table: bool,
    pub use_killers: bool,
    pub use_history: bool,
    /// Half-width of the aspiration window in centipawns; 0 searches every
    /// iteration with a full window
    pub aspiration_window: i32,
    /// Quiescence searches every evasion when the side to move is in check
    pub quiescence_check_evasions: bool,
    pub repetition_scope: RepetitionScope,
    pub max_depth: u32,
}

impl Default for SearchParams {
    fn default() -> Self {
        SearchParams {
            hash_mb: 16,
            use_transposition_table: true,
            use_killers: true,
            use_history: true,
            aspiration_window: 50,
            quiescence_check_evasions: true,
            repetition_scope: RepetitionScope::Game,
            max_depth: 64,
        }
    }
}

/// Largest accepted `Hash` option, 64 GiB.
pub const MAX_HASH_MB: usize = 64 * 1024;

impl SearchParams {
    /// Apply a named option given as text. Names are case-insensitive.
    ///
    /// On error the parameters are left untouched.
    pub fn set_option(&mut self, name: &str, value: &str) -> Result<(), OptionError> {
        let value = value.trim();
        match name.trim().to_ascii_lowercase().as_str() {
            "hash" => {
                let mb = parse_number::<usize>(name, value)?;
                if mb == 0 || mb > MAX_HASH_MB {
                    return Err(invalid(name, value));
                }
                self.hash_mb = mb;
            }
            "usehash" => self.use_transposition_table = parse_bool(name, value)?,
            "killers" => self.use_killers = parse_bool(name, value)?,
            "history" => self.use_history = parse_bool(name, value)?,
            "aspirationwindow" => {
                let window = parse_number::<i32>(name, value)?;
                if window < 0 {
                    return Err(invalid(name, value));
                }
                self.aspiration_window = window;
            }
            "quiescencechecks" => self.quiescence_check_evasions = parse_bool(name, value)?,
            "repetitionscope" => {
                self.repetition_scope = match value.to_ascii_lowercase().as_str() {
                    "game" => RepetitionScope::Game,
                    "searchtree" | "search" | "tree" => RepetitionScope::SearchTree,
                    _ => return Err(invalid(name, value)),
                };
            }
            "maxdepth" => {
                let depth = parse_number::<u32>(name, value)?;
                if depth == 0 || depth as usize >= MAX_PLY {
                    return Err(invalid(name, value));
                }
                self.max_depth = depth;
            }
            _ => {
                return Err(OptionError::UnknownOption {
                    name: name.to_string(),
                })
            }
        }
        Ok(())
    }
}

fn invalid(name: &str, value: &str) -> OptionError {
    OptionError::InvalidValue {
        name: name.to_string(),
        value: value.to_string(),
    }
}

fn parse_number<T: std::str::FromStr>(name: &str, value: &str) -> Result<T, OptionError> {
    value.parse().map_err(|_| invalid(name, value))
}

fn parse_bool(name: &str, value: &str) -> Result<bool, OptionError> {
    match value.to_ascii_lowercase().as_str() {
        "true" | "on" | "1" => Ok(true),
        "false" | "off" | "0" => Ok(false),
        _ => Err(invalid(name, value)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_are_case_insensitive() {
        let mut params = SearchParams::default();
        params.set_option("HASH", "64").unwrap();
        params.set_option("usehash", "false").unwrap();
        params.set_option("RepetitionScope", "SearchTree").unwrap();
        assert_eq!(params.hash_mb, 64);
        assert!(!params.use_transposition_table);
        assert_eq!(params.repetition_scope, RepetitionScope::SearchTree);
    }

    #[test]
    fn rejects_bad_values_without_changes() {
        let mut params = SearchParams::default();
        let before = params.clone();
        assert!(matches!(
            params.set_option("Hash", "lots"),
            Err(OptionError::InvalidValue { .. })
        ));
        assert!(params.set_option("MaxDepth", "0").is_err());
        assert!(params.set_option("AspirationWindow", "-5").is_err());
        assert!(params.set_option("Killers", "maybe").is_err());
        assert_eq!(params, before);
    }

    #[test]
    fn hash_size_is_capped() {
        let mut params = SearchParams::default();
        let before = params.clone();
        assert!(matches!(
            params.set_option("Hash", "65537"),
            Err(OptionError::InvalidValue { .. })
        ));
        assert!(params.set_option("Hash", &usize::MAX.to_string()).is_err());
        assert_eq!(params, before);

        params.set_option("Hash", "65536").unwrap();
        assert_eq!(params.hash_mb, MAX_HASH_MB);
    }

    #[test]
    fn unknown_option() {
        let mut params = SearchParams::default();
        assert_eq!(
            params.set_option("Ponder", "true"),
            Err(OptionError::UnknownOption {
                name: "Ponder".to_string()
            })
        );
    }
}
