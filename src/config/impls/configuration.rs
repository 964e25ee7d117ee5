use std::fs::File;
use std::io::Write;
use std::path::Path;
use crate::config::enums::configuration_error::ConfigurationError;
use crate::config::structs::configuration::Configuration;
use crate::config::structs::database_config::DatabaseConfig;
use crate::config::structs::migration_config::MigrationConfig;
use crate::database::enums::database_drivers::DatabaseDrivers;
use crate::database::helpers::is_valid_identifier;
use crate::logging::logging::parse_level_filter;

impl Configuration {
    pub fn init() -> Configuration {
        Configuration {
            log_level: String::from("info"),
            database: DatabaseConfig::default(),
            migrations: MigrationConfig::default(),
        }
    }

    pub fn load(data: &[u8]) -> Result<Configuration, toml::de::Error> {
        toml::from_str(&String::from_utf8_lossy(data))
    }

    pub fn load_file(path: &str) -> Result<Configuration, ConfigurationError> {
        let data = std::fs::read(path)?;
        Ok(Self::load(data.as_slice())?)
    }

    pub fn save_file(path: &str, data: String) -> Result<(), ConfigurationError> {
        if let Some(parent) = Path::new(path).parent()
            && !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        let mut file = File::create(path)?;
        file.write_all(data.as_ref())?;
        Ok(())
    }

    /// Loads `path`, applies environment overrides and validates.
    ///
    /// When the file is missing or unreadable and `create` is set, a default
    /// configuration is written to `path` and returned as an error so the
    /// operator can review it before the first run.
    pub fn load_from_file(path: &str, create: bool) -> Result<Configuration, ConfigurationError> {
        let mut config = match Configuration::load_file(path) {
            Ok(config) => config,
            Err(error) => {
                eprintln!("No config file found or corrupt.");
                eprintln!("[ERROR] {}", error);

                if !create {
                    eprintln!("You can either create your own {} file, or start this app using '--create-config' as parameter.", path);
                    return Err(ConfigurationError::Missing(format!("will not create {} automatically", path)));
                }
                eprintln!("Creating config file..");

                let config_toml = toml::to_string(&Configuration::init())?;
                Configuration::save_file(path, config_toml)?;
                eprintln!("Please edit {}, exiting now...", path);
                return Err(ConfigurationError::Missing(format!("created {}", path)));
            }
        };

        config.apply_env_overrides();
        println!("[VALIDATE] Validating configuration...");
        config.validate()?;
        Ok(config)
    }

    pub fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    /// Applies `CAREBASE_*` overrides read through `lookup`.
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(engine) = lookup("CAREBASE_DB_ENGINE") {
            match engine.as_str() {
                "pgsql" => self.database.engine = DatabaseDrivers::pgsql,
                "sqlite3" => self.database.engine = DatabaseDrivers::sqlite3,
                other => eprintln!("[CONFIG] Ignoring unknown CAREBASE_DB_ENGINE '{}'", other),
            }
        }
        if let Some(host) = lookup("CAREBASE_PG_HOST") {
            self.database.pgsql.host = host;
        }
        if let Some(port) = lookup("CAREBASE_PG_PORT") {
            match port.parse::<u16>() {
                Ok(port) => self.database.pgsql.port = port,
                Err(_) => eprintln!("[CONFIG] Ignoring invalid CAREBASE_PG_PORT '{}'", port),
            }
        }
        if let Some(username) = lookup("CAREBASE_PG_USER") {
            self.database.pgsql.username = username;
        }
        if let Some(password) = lookup("CAREBASE_PG_PASSWORD") {
            self.database.pgsql.password = password;
        }
        if let Some(database) = lookup("CAREBASE_PG_DATABASE") {
            self.database.pgsql.database = database;
        }
        if let Some(path) = lookup("CAREBASE_SQLITE_PATH") {
            self.database.sqlite.path = path;
        }
    }

    pub fn validate(&self) -> Result<(), ConfigurationError> {
        if parse_level_filter(self.log_level.as_str()).is_none() {
            return Err(ConfigurationError::ValidationError(format!("Unknown log level: \"{}\"", self.log_level)));
        }
        Self::validate_value("[migrations] table", self.migrations.table.as_str())?;
        if self.migrations.directory.trim().is_empty() {
            return Err(ConfigurationError::ValidationError(String::from("[migrations] directory must not be empty")));
        }
        match self.database.engine {
            DatabaseDrivers::pgsql => {
                let pgsql = &self.database.pgsql;
                if pgsql.host.trim().is_empty() {
                    return Err(ConfigurationError::ValidationError(String::from("[database.pgsql] host must not be empty")));
                }
                if pgsql.max_connections == 0 {
                    return Err(ConfigurationError::ValidationError(String::from("[database.pgsql] max_connections must be at least 1")));
                }
                if pgsql.max_retries == 0 {
                    return Err(ConfigurationError::ValidationError(String::from("[database.pgsql] max_retries must be at least 1")));
                }
            }
            DatabaseDrivers::sqlite3 => {
                if self.database.sqlite.path.trim().is_empty() {
                    return Err(ConfigurationError::ValidationError(String::from("[database.sqlite] path must not be empty")));
                }
            }
        }
        Ok(())
    }

    pub fn validate_value(name: &str, value: &str) -> Result<(), ConfigurationError>
    {
        if !is_valid_identifier(value) {
            return Err(ConfigurationError::ValidationError(format!("Error checking {} [:] Name: \"{}\"", name, value)));
        }
        Ok(())
    }
}

impl Default for Configuration {
    fn default() -> Self {
        Configuration::init()
    }
}
