use std::path::{Path, PathBuf};

/// GraphQL endpoint of the CircleCI orb registry
pub const ORB_GRAPHQL_URL: &str = "https://circleci.com/graphql-unstable";

/// Base URL of the public orb registry pages, used as a homepage fallback
pub const ORB_REGISTRY_HOMEPAGE: &str = "https://circleci.com/orbs/registry/orb";

/// Cache namespace for orb lookups
pub const ORB_CACHE_NAMESPACE: &str = "orb";

/// How long a successful orb lookup stays cached, in minutes
pub const ORB_CACHE_MINUTES: u32 = 15;

const APP_DIR: &str = "orb-datasource";
const DB_FILE: &str = "cache.db";
const LOG_FILE: &str = "orb-datasource.log";

/// On-disk locations used by the cache and the log file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Paths {
    data_dir: PathBuf,
}

impl Paths {
    /// Resolves the data directory. An explicit directory is used as-is;
    /// otherwise `$XDG_DATA_HOME/orb-datasource`, then
    /// `~/.local/share/orb-datasource`, then `./orb-datasource`.
    pub fn resolve(data_dir: Option<PathBuf>) -> Self {
        Self::resolve_with_env(
            data_dir,
            std::env::var_os("XDG_DATA_HOME").map(PathBuf::from),
            dirs::home_dir(),
        )
    }

    fn resolve_with_env(
        data_dir: Option<PathBuf>,
        xdg_data_home: Option<PathBuf>,
        home_dir: Option<PathBuf>,
    ) -> Self {
        let data_dir = data_dir.unwrap_or_else(|| {
            xdg_data_home
                .filter(|dir| !dir.as_os_str().is_empty())
                .or_else(|| home_dir.map(|home| home.join(".local/share")))
                .unwrap_or_else(|| PathBuf::from("."))
                .join(APP_DIR)
        });

        Self { data_dir }
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn db_path(&self) -> PathBuf {
        self.data_dir.join(DB_FILE)
    }

    pub fn log_path(&self) -> PathBuf {
        self.data_dir.join(LOG_FILE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::explicit_dir_wins(
        Some("/srv/orbs"),
        Some("/tmp/xdg"),
        Some("/home/user"),
        "/srv/orbs"
    )]
    #[case::xdg_data_home(None, Some("/tmp/xdg"), Some("/home/user"), "/tmp/xdg/orb-datasource")]
    #[case::empty_xdg_is_ignored(
        None,
        Some(""),
        Some("/home/user"),
        "/home/user/.local/share/orb-datasource"
    )]
    #[case::home_local_share(None, None, Some("/home/user"), "/home/user/.local/share/orb-datasource")]
    #[case::current_dir(None, None, None, "./orb-datasource")]
    fn resolve_picks_data_dir_by_precedence(
        #[case] data_dir: Option<&str>,
        #[case] xdg_data_home: Option<&str>,
        #[case] home_dir: Option<&str>,
        #[case] expected: &str,
    ) {
        let paths = Paths::resolve_with_env(
            data_dir.map(PathBuf::from),
            xdg_data_home.map(PathBuf::from),
            home_dir.map(PathBuf::from),
        );

        assert_eq!(paths.data_dir(), Path::new(expected));
    }

    #[test]
    fn db_and_log_files_live_in_the_data_dir() {
        let paths = Paths::resolve(Some(PathBuf::from("/srv/orbs")));

        assert_eq!(paths.db_path(), PathBuf::from("/srv/orbs/cache.db"));
        assert_eq!(paths.log_path(), PathBuf::from("/srv/orbs/orb-datasource.log"));
    }
}
