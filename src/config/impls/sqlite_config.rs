use crate::config::structs::sqlite_config::SQLiteConfig;

impl SQLiteConfig {
    pub fn is_memory(&self) -> bool {
        self.path == ":memory:"
    }
}

impl Default for SQLiteConfig {
    fn default() -> Self {
        SQLiteConfig {
            path: String::from("data/carebase.db"),
        }
    }
}
