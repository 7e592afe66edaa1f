use fleetops_backend::infra::migration::{
    self, MigrationConfig, BASELINE_ACTIVITY, DIFF_ACTIVITY, MAIN_ACTIVITY,
};

const USAGE: &str = "usage: fleetops_migrate <run|status|baseline|diff> [activity]";

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt::init();

    let mut args = std::env::args().skip(1);
    let command = args.next().unwrap_or_else(|| {
        eprintln!("{USAGE}");
        std::process::exit(2);
    });
    let activity_name = args.next();

    let config = MigrationConfig::from_env();

    let result = match command.as_str() {
        "run" => {
            let name = activity_name.as_deref().unwrap_or(MAIN_ACTIVITY);
            run(&config, name).await
        }
        "status" => {
            let name = activity_name.as_deref().unwrap_or(MAIN_ACTIVITY);
            status(&config, name).await
        }
        "baseline" => {
            let name = activity_name.as_deref().unwrap_or(BASELINE_ACTIVITY);
            baseline(&config, name).await
        }
        "diff" => {
            let name = activity_name.as_deref().unwrap_or(DIFF_ACTIVITY);
            diff(&config, name).await
        }
        _ => {
            eprintln!("{USAGE}");
            std::process::exit(2);
        }
    };

    if let Err(err) = result {
        eprintln!("migration failed: {err}");
        std::process::exit(1);
    }
}

async fn run(
    config: &MigrationConfig,
    name: &str,
) -> Result<(), fleetops_backend::error::migration::MigrationError> {
    let activity = migration::find_activity(config, name)?;
    let report = migration::run(&activity).await?;
    println!(
        "{name}: applied {} changesets, {} already applied",
        report.applied, report.skipped
    );
    Ok(())
}

async fn status(
    config: &MigrationConfig,
    name: &str,
) -> Result<(), fleetops_backend::error::migration::MigrationError> {
    let activity = migration::find_activity(config, name)?;
    for changeset in migration::status(&activity).await? {
        let mark = if changeset.applied { "applied" } else { "pending" };
        println!(
            "{mark}  {}::{}:{}",
            changeset.file, changeset.author, changeset.id
        );
    }
    Ok(())
}

async fn baseline(
    config: &MigrationConfig,
    name: &str,
) -> Result<(), fleetops_backend::error::migration::MigrationError> {
    let activity = migration::find_activity(config, name)?;
    let path = migration::generate_baseline(&activity).await?;
    println!("{name}: baseline changelog written to {}", path.display());
    Ok(())
}

async fn diff(
    config: &MigrationConfig,
    name: &str,
) -> Result<(), fleetops_backend::error::migration::MigrationError> {
    let activity = migration::find_activity(config, name)?;
    let path = migration::generate_diff(&activity).await?;
    println!("{name}: diff changelog written to {}", path.display());
    Ok(())
}
