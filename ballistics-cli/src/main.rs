/**
 * @brief      Command line front end to lib_ballistics.
 *
 * @note       Program flags (output file, verbosity, which propellant table to
 *             use) go through clap. Everything that changes the numerical
 *             result is a model parameter given as key=value pairs after the
 *             subcommand, routed to lib_config, for example
 *
 *             ballistics artillery --powder=12/7 -o shot.bin barrel=5.1 nodes=200
 *
 *             A JSON gun record given with --gun replaces the built-in preset
 *             as the starting point; key=value pairs still override it.
 */




// ============================================================================
use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};
use thiserror::Error;

use lib_ballistics::{
    Archive, ArtilleryGun, Gas, PneumaticGun, PropellantSource, PropellantTable, Solution, SolverOptions,
};
use lib_config::{ConfigError, Form};




// ============================================================================
#[derive(Debug, Error)]
enum AppError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Ballistics(#[from] lib_ballistics::Error),

    #[error("parameter '{0}' must be a positive integer")]
    NotACount(&'static str),

    #[error("could not print a record: {0}")]
    Json(#[from] serde_json::Error),

    #[cfg(feature = "hdf5")]
    #[error("HDF5 write failed: {0}")]
    Hdf5(#[from] hdf5::Error),
}




// ============================================================================
#[derive(Parser)]
#[command(version, about = "Interior ballistics of pneumatic and propellant guns")]
struct Cli {
    /// Log more (-v for debug, -vv for trace); RUST_LOG overrides
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Fire a gun driven by compressed gas
    Pneumatic(ShotArgs),

    /// Fire a gun driven by a burning propellant charge
    Artillery {
        /// Name of the propellant in the table
        #[arg(long, default_value = "16/1 tr")]
        powder: String,

        /// JSON propellant table to use instead of the built-in one
        #[arg(long)]
        powders: Option<PathBuf>,

        #[command(flatten)]
        shot: ShotArgs,
    },

    /// List the propellants in the table, or show one of them
    Powders {
        name: Option<String>,

        #[arg(long)]
        powders: Option<PathBuf>,
    },
}

#[derive(Args)]
struct ShotArgs {
    /// Write the trajectory here (.h5 files need the hdf5 feature)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Do not print the parameter table
    #[arg(short, long)]
    quiet: bool,

    /// JSON gun record to start from instead of the built-in preset
    #[arg(long)]
    gun: Option<PathBuf>,

    /// Model parameters as key=value pairs
    parameters: Vec<String>,
}




// ============================================================================
fn solver_items(form: Form) -> Form {
    form.item("nodes"     , 100_i64       , "Number of grid cells, ghosts included")
        .item("max_steps" , 5_000_000_i64 , "Give up after this many steps")
}

fn pneumatic_form(args: &ShotArgs, gun: &PneumaticGun) -> Result<Form, ConfigError> {
    let gas = Gas::air();
    let form = Form::new()
        .item("shell"    , gun.shell            , "Projectile mass [kg]")
        .item("kurant"   , gun.kurant           , "Courant number")
        .item("barrel"   , gun.barrel           , "Barrel length from the breech [m]")
        .item("caliber"  , gun.caliber          , "Bore diameter [m]")
        .item("chamber"  , gun.chamber          , "Initial projectile base position [m]")
        .item("initialp" , gun.initial_pressure , "Initial gas pressure [Pa]")
        .item("k"        , gas.gamma            , "Adiabatic index of the gas")
        .item("R"        , gas.gas_constant     , "Gas constant [J/kg/K]")
        .item("ro"       , gas.density          , "Initial gas density [kg/m^3]");
    solver_items(form).merge_string_map(lib_config::to_string_map_from_key_val_pairs(args.parameters.clone())?)
}

fn artillery_form(args: &ShotArgs, gun: &ArtilleryGun) -> Result<Form, ConfigError> {
    let form = Form::new()
        .item("shell"     , gun.shell             , "Projectile mass [kg]")
        .item("barrel"    , gun.barrel            , "Barrel length from the breech [m]")
        .item("kurant"    , gun.kurant            , "Courant number")
        .item("boostp"    , gun.boost_pressure    , "Base pressure that starts the projectile [Pa]")
        .item("caliber"   , gun.caliber           , "Bore diameter [m]")
        .item("denload"   , gun.loading_density   , "Loading density [kg/m^3]")
        .item("omega_q"   , gun.charge_ratio      , "Charge mass over projectile mass")
        .item("press_vsp" , gun.ignition_pressure , "Igniter pressure [Pa]");
    solver_items(form).merge_string_map(lib_config::to_string_map_from_key_val_pairs(args.parameters.clone())?)
}




// ============================================================================
fn count(form: &Form, key: &'static str) -> Result<usize, AppError> {
    match form.int(key)? {
        n if n > 0 => Ok(n as usize),
        _ => Err(AppError::NotACount(key)),
    }
}

fn solver_options(form: &Form) -> Result<SolverOptions, AppError> {
    Ok(SolverOptions {
        nodes: count(form, "nodes")?,
        max_steps: count(form, "max_steps")?,
    })
}

fn print_form(form: &Form) {
    for (key, parameter) in form {
        println!("\t{:.<24} {: <12} {}", key, parameter.value, parameter.about);
    }
}

fn pneumatic_gun(path: &Option<PathBuf>) -> Result<PneumaticGun, lib_ballistics::Error> {
    match path {
        Some(path) => PneumaticGun::from_json_file(path),
        None => Ok(PneumaticGun::preset()),
    }
}

fn artillery_gun(path: &Option<PathBuf>) -> Result<ArtilleryGun, lib_ballistics::Error> {
    match path {
        Some(path) => ArtilleryGun::from_json_file(path),
        None => Ok(ArtilleryGun::preset()),
    }
}

fn load_table(path: &Option<PathBuf>) -> Result<PropellantTable, lib_ballistics::Error> {
    match path {
        Some(path) => PropellantTable::open(path),
        None => PropellantTable::builtin(),
    }
}




// ============================================================================
#[cfg(feature = "hdf5")]
fn write_hdf5(solution: &Solution, filename: &Path) -> Result<(), hdf5::Error> {
    use hdf5::File;

    let file = File::create(filename)?;
    let trajectory = solution.trajectory();
    let datasets = [
        ("time", trajectory.time()),
        ("position", trajectory.position()),
        ("velocity", trajectory.velocity()),
        ("base_pressure", trajectory.base_pressure()),
        ("breech_pressure", trajectory.breech_pressure()),
    ];
    for (name, data) in datasets.iter() {
        file.new_dataset::<f64>().shape(data.len()).create(*name)?.write(ndarray::aview1(data))?;
    }
    Ok(())
}

fn write_output(solution: &Solution, filename: &Path) -> Result<(), AppError> {
    #[cfg(feature = "hdf5")]
    {
        if filename.extension().map_or(false, |ext| ext == "h5") {
            write_hdf5(solution, filename)?;
            log::info!("wrote {}", filename.display());
            return Ok(());
        }
    }
    solution.save(&Archive::new(filename))?;
    Ok(())
}

fn report(solution: &Solution, args: &ShotArgs) -> Result<(), AppError> {
    println!("{} shot finished after {} steps", solution.model(), solution.steps());
    println!("\tmuzzle velocity ....... {:.2} m/s", solution.muzzle_velocity());
    println!("\tshot time ............. {:.3} ms", solution.shot_time() * 1e3);
    println!("\tpeak base pressure .... {:.2} MPa", solution.peak_base_pressure() * 1e-6);
    println!("\tpeak breech pressure .. {:.2} MPa", solution.peak_breech_pressure() * 1e-6);

    if let Some(output) = &args.output {
        write_output(solution, output)?;
    }
    Ok(())
}




// ============================================================================
fn run(cli: Cli) -> Result<(), AppError> {
    match cli.command {
        Command::Pneumatic(args) => {
            let form = pneumatic_form(&args, &pneumatic_gun(&args.gun)?)?;
            if !args.quiet {
                print_form(&form);
            }
            let gun = PneumaticGun {
                shell: form.float("shell")?,
                kurant: form.float("kurant")?,
                barrel: form.float("barrel")?,
                caliber: form.float("caliber")?,
                chamber: form.float("chamber")?,
                initial_pressure: form.float("initialp")?,
            };
            let gas = Gas {
                gamma: form.float("k")?,
                gas_constant: form.float("R")?,
                density: form.float("ro")?,
            };
            if !args.quiet {
                println!("\t{:.<24} {: <12.1} {}", "temperature", gas.temperature(gun.initial_pressure), "Initial gas temperature [K]");
            }
            let solution = Solution::pneumatic(&gun, &gas, &solver_options(&form)?)?;
            report(&solution, &args)
        }

        Command::Artillery { powder, powders, shot: args } => {
            let form = artillery_form(&args, &artillery_gun(&args.gun)?)?;
            if !args.quiet {
                println!("\t{:.<24} {: <12} {}", "powder", powder, "Propellant name");
                print_form(&form);
            }
            let gun = ArtilleryGun {
                shell: form.float("shell")?,
                barrel: form.float("barrel")?,
                kurant: form.float("kurant")?,
                boost_pressure: form.float("boostp")?,
                caliber: form.float("caliber")?,
                loading_density: form.float("denload")?,
                charge_ratio: form.float("omega_q")?,
                ignition_pressure: form.float("press_vsp")?,
            };
            let table = load_table(&powders)?;
            let solution = Solution::artillery(&gun, &table, &powder, &solver_options(&form)?)?;
            report(&solution, &args)
        }

        Command::Powders { name: None, powders } => {
            for name in load_table(&powders)?.names() {
                println!("{}", name);
            }
            Ok(())
        }

        Command::Powders { name: Some(name), powders } => {
            let table = load_table(&powders)?;
            let propellant = table.lookup(&name)?;
            if let Some(record) = table.record(&name) {
                println!("{}", serde_json::to_string_pretty(record)?);
            }
            println!("\tforce ................. {:.4e} J/kg", propellant.force);
            println!("\tadiabatic index ....... {:.4}", propellant.gamma);
            println!("\tburnout impulse ....... {:.4e} Pa s", propellant.impulse);
            Ok(())
        }
    }
}




// ============================================================================
fn main() {
    let cli = Cli::parse();
    let level = match cli.verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    if let Err(error) = run(cli) {
        log::error!("{}", error);
        std::process::exit(1);
    }
}
