//! Command-line entry point for the taxi persistence core.
//!
//! # Responsibility
//! - Wire provider → repositories → service explicitly from CLI arguments.
//! - Offer a seeded demo run plus read/delete commands over a database file.

use clap::{Parser, Subcommand};
use log::info;
use std::error::Error;
use std::path::PathBuf;
use taxi_core::{
    Car, CarService, ConnectionProvider, Driver, DriverRepository, FileConnectionProvider,
    Manufacturer, ManufacturerRepository, MemoryConnectionProvider, SqliteCarRepository,
    SqliteDriverRepository, SqliteManufacturerRepository,
};

type CliResult<T> = Result<T, Box<dyn Error>>;

/// Car, manufacturer and driver storage over SQLite.
#[derive(Parser, Debug)]
#[command(name = "taxi", version)]
struct Cli {
    /// SQLite database file. An in-memory database is used when omitted.
    #[arg(long, env = "TAXI_DB_PATH", value_name = "PATH", global = true)]
    db: Option<PathBuf>,

    /// Log level: trace|debug|info|warn|error.
    #[arg(long, env = "TAXI_LOG_LEVEL", global = true)]
    log_level: Option<String>,

    /// Absolute directory for rotating log files. Logging is off when omitted.
    #[arg(long, env = "TAXI_LOG_DIR", value_name = "DIR", global = true)]
    log_dir: Option<String>,

    /// Print results as JSON.
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Seed a manufacturer, two drivers and a car, then walk through updates.
    Demo,
    /// List every visible car with its drivers.
    Cars,
    /// Show one car.
    Car {
        id: i64,
    },
    /// List cars linked to a driver.
    CarsByDriver {
        driver_id: i64,
    },
    /// Soft-delete a car.
    DeleteCar {
        id: i64,
    },
}

fn main() -> CliResult<()> {
    let cli = Cli::parse();

    if let Some(log_dir) = cli.log_dir.as_deref() {
        let level = cli
            .log_level
            .as_deref()
            .unwrap_or(taxi_core::default_log_level());
        taxi_core::init_logging(level, log_dir)?;
    }

    let provider: Box<dyn ConnectionProvider> = match cli.db.as_ref() {
        Some(path) => Box::new(FileConnectionProvider::try_new(path)?),
        None => Box::new(MemoryConnectionProvider::try_new()?),
    };
    info!(
        "event=cli_start module=cli status=ok command={:?} file_db={}",
        cli.command,
        cli.db.is_some()
    );

    run(&cli, &*provider)
}

fn run(cli: &Cli, provider: &dyn ConnectionProvider) -> CliResult<()> {
    let cars = CarService::new(SqliteCarRepository::new(provider));

    match &cli.command {
        Command::Demo => demo(cli.json, provider, &cars),
        Command::Cars => print_cars(cli.json, &cars.get_all()?),
        Command::Car { id } => match cars.get(*id)? {
            Some(car) => print_cars(cli.json, std::slice::from_ref(&car)),
            None => {
                println!("car {id} not found");
                Ok(())
            }
        },
        Command::CarsByDriver { driver_id } => {
            print_cars(cli.json, &cars.get_all_by_driver(*driver_id)?)
        }
        Command::DeleteCar { id } => {
            let deleted = cars.delete(*id)?;
            println!("car {id} deleted={deleted}");
            Ok(())
        }
    }
}

fn demo(
    json: bool,
    provider: &dyn ConnectionProvider,
    cars: &CarService<SqliteCarRepository<&dyn ConnectionProvider>>,
) -> CliResult<()> {
    let manufacturers = SqliteManufacturerRepository::new(provider);
    let drivers = SqliteDriverRepository::new(provider);

    let toyota = manufacturers.create(Manufacturer::new("Toyota", "Japan"))?;
    let ann = drivers.create(Driver::new("Ann", "X1"))?;
    let bob = drivers.create(Driver::new("Bob", "X2"))?;

    let mut corolla = Car::new("Corolla", toyota);
    corolla.add_driver(ann.clone());
    let corolla = cars.create(corolla)?;
    println!("-- created");
    print_cars(json, &cars.get_all()?)?;

    let corolla = cars.add_driver_to_car(bob.clone(), corolla)?;
    println!("-- added driver {}", bob.id.unwrap_or_default());
    print_cars(json, &cars.get_all()?)?;

    let corolla = cars.remove_driver_from_car(&ann, corolla)?;
    println!("-- removed driver {}", ann.id.unwrap_or_default());
    print_cars(json, &cars.get_all()?)?;

    println!("-- cars driven by driver {}", bob.id.unwrap_or_default());
    print_cars(json, &cars.get_all_by_driver(bob.id.unwrap_or_default())?)?;

    let car_id = corolla.id.unwrap_or_default();
    let deleted = cars.delete(car_id)?;
    println!("-- deleted car {car_id}: {deleted}");
    print_cars(json, &cars.get_all()?)
}

fn print_cars(json: bool, cars: &[Car]) -> CliResult<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(cars)?);
        return Ok(());
    }

    if cars.is_empty() {
        println!("(no cars)");
    }
    for car in cars {
        let drivers = car
            .drivers
            .iter()
            .map(|driver| format!("{} [{}]", driver.name, driver.license_number))
            .collect::<Vec<_>>();
        println!(
            "#{} {} by {} ({}) drivers: {}",
            car.id.unwrap_or_default(),
            car.model,
            car.manufacturer.name,
            car.manufacturer.country,
            if drivers.is_empty() {
                "-".to_string()
            } else {
                drivers.join(", ")
            }
        );
    }
    Ok(())
}
