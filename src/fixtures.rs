#[cfg(test)]
pub mod test {
    use std::time::Duration;

    use crate::schema::{Record, Reflect, Shape};

    /// Covers every supported kind plus each metadata key.
    #[derive(Debug, Default, PartialEq)]
    pub struct TestConfig {
        pub node_id: String,
        pub log_level: String,
        pub listen_address: i64,
        pub advertise_address: i32,
        pub migration_path: f64,
        pub database_dsn: i32,
        pub bool_test: bool,
        pub test: i64,
        pub skip_migration: Duration,
    }

    impl Reflect for TestConfig {
        fn reflect(&mut self) -> Shape<'_> {
            Record::new("TestConfig")
                .field("NodeID", &mut self.node_id, r#"default:"ulala""#)
                .field("LogLevel", &mut self.log_level, r#"usage:"just to see logs""#)
                .field("ListenAddress", &mut self.listen_address, r#"flag:"flag-name""#)
                .field("AdvertiseAddress", &mut self.advertise_address, r#"env:"env-name""#)
                .field("MigrationPath", &mut self.migration_path, r#"hidden:"true""#)
                .field("DatabaseDSN", &mut self.database_dsn, "")
                .field("BoolTest", &mut self.bool_test, "")
                .field("Test", &mut self.test, r#"default:"42""#)
                .field("SkipMigration", &mut self.skip_migration, "")
                .into()
        }
    }

    /// The settings of a small server, with usage text and defaults on
    /// every field.
    #[derive(Debug, Default, PartialEq)]
    pub struct ServerConfig {
        pub listen_address: String,
        pub workers: u8,
        pub ratio: f32,
        pub max_body: u64,
        pub read_timeout: Duration,
        pub verbose: bool,
        pub secret: String,
    }

    impl Reflect for ServerConfig {
        fn reflect(&mut self) -> Shape<'_> {
            Record::new("ServerConfig")
                .field(
                    "ListenAddress",
                    &mut self.listen_address,
                    r#"usage:"Address to bind" default:"0.0.0.0:9000""#,
                )
                .field(
                    "Workers",
                    &mut self.workers,
                    r#"usage:"Worker threads" default:"4""#,
                )
                .field("Ratio", &mut self.ratio, r#"usage:"Sample ratio" default:"0.5""#)
                .field(
                    "MaxBody",
                    &mut self.max_body,
                    r#"usage:"Maximum body size" default:"1048576""#,
                )
                .field(
                    "ReadTimeout",
                    &mut self.read_timeout,
                    r#"usage:"Read timeout" default:"30s""#,
                )
                .field("Verbose", &mut self.verbose, r#"usage:"Verbose logging""#)
                .field(
                    "Secret",
                    &mut self.secret,
                    r#"usage:"Shared secret" hidden:"true""#,
                )
                .into()
        }
    }

    /// A record with a sequence field, which has no flag variant.
    #[derive(Debug, Default)]
    pub struct UnsupportedConfig {
        pub name: String,
        pub peers: Vec<u8>,
    }

    impl Reflect for UnsupportedConfig {
        fn reflect(&mut self) -> Shape<'_> {
            Record::new("UnsupportedConfig")
                .field("Name", &mut self.name, "")
                .field("Peers", &mut self.peers, "")
                .into()
        }
    }

    pub struct EmptyConfig;

    impl Reflect for EmptyConfig {
        fn reflect(&mut self) -> Shape<'_> {
            Record::new("EmptyConfig").into()
        }
    }
}
