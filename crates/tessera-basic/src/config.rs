use std::path::PathBuf;

/// Settings of the demo, read once at startup.
#[derive(Debug, Clone, PartialEq)]
pub struct BasicConfig {
    /// Where the start bitmap is written as PNG. `None` disables the snapshot.
    pub snapshot_path: Option<PathBuf>,
    /// Fixed seed for the pixel scatter; random when unset.
    pub seed: Option<u64>,
    /// Font for the FPS overlay; a system font when unset.
    pub font_path: Option<PathBuf>,
}

impl Default for BasicConfig {
    fn default() -> Self {
        Self {
            snapshot_path: Some(PathBuf::from("test.png")),
            seed: None,
            font_path: None,
        }
    }
}

impl BasicConfig {
    pub const SNAPSHOT_VAR: &'static str = "TESSERA_SNAPSHOT";
    pub const SEED_VAR: &'static str = "TESSERA_SEED";
    pub const FONT_VAR: &'static str = "TESSERA_FONT";

    pub fn from_env() -> Self {
        Self::from_vars(|name| std::env::var(name).ok())
    }

    /// Builds the config from a variable lookup.
    ///
    /// An empty `TESSERA_SNAPSHOT` disables the snapshot. An unparsable seed
    /// is ignored with a warning.
    pub fn from_vars(var: impl Fn(&str) -> Option<String>) -> Self {
        let mut cfg = Self::default();

        if let Some(path) = var(Self::SNAPSHOT_VAR) {
            cfg.snapshot_path = (!path.is_empty()).then(|| PathBuf::from(path));
        }

        if let Some(seed) = var(Self::SEED_VAR) {
            match seed.trim().parse::<u64>() {
                Ok(s) => cfg.seed = Some(s),
                Err(e) => log::warn!("ignoring {}={seed:?}: {e}", Self::SEED_VAR),
            }
        }

        cfg.font_path = var(Self::FONT_VAR)
            .filter(|p| !p.is_empty())
            .map(PathBuf::from);

        cfg
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn vars(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn defaults_without_environment() {
        assert_eq!(BasicConfig::from_vars(vars(&[])), BasicConfig::default());
    }

    #[test]
    fn reads_every_variable() {
        let cfg = BasicConfig::from_vars(vars(&[
            ("TESSERA_SNAPSHOT", "/tmp/out.png"),
            ("TESSERA_SEED", " 99 "),
            ("TESSERA_FONT", "/fonts/a.ttf"),
        ]));
        assert_eq!(cfg.snapshot_path, Some(PathBuf::from("/tmp/out.png")));
        assert_eq!(cfg.seed, Some(99));
        assert_eq!(cfg.font_path, Some(PathBuf::from("/fonts/a.ttf")));
    }

    #[test]
    fn empty_snapshot_disables_it_and_bad_seed_is_ignored() {
        let cfg = BasicConfig::from_vars(vars(&[("TESSERA_SNAPSHOT", ""), ("TESSERA_SEED", "abc")]));
        assert_eq!(cfg.snapshot_path, None);
        assert_eq!(cfg.seed, None);
    }
}
