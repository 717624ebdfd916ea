use crate::cli::parser::Cli;
use crate::config::Config;
use crate::core::TimeService;
use crate::db::migrate::current_version;
use crate::errors::AppResult;

/// Handle the `init` command
///
/// This initializes:
///  - the configuration file (skipped with `--test`)
///  - the database directory
///  - the schema, through the same connect + setup path every command uses
pub fn handle(cli: &Cli, cfg: &Config) -> AppResult<()> {
    cfg.init_all(cli.test)?;

    println!("⚙️  Initializing rTimeclock…");
    println!("🗄️  Database   : {}", cfg.database);

    let service = TimeService::connect(cfg)?;
    let pool = service.store().pool();
    let version = pool.with_conn(|conn| current_version(conn))?;

    println!("✅ Database initialized at {} (schema v{version})", pool.path());
    service.shutdown()
}
