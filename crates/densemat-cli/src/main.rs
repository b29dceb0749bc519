use anyhow::Result;
use clap::{Arg, ArgMatches, Command, ValueHint};
use log::LevelFilter;
use std::path::PathBuf;
use std::str::FromStr;

use densemat::ProductConfig;
use densemat_cli::eval::{demo_expression, demo_operands, evaluate, EvalRequest, Operation};
use densemat_cli::input::{load_product_config, read_matrix, write_matrix};

fn main() -> Result<()> {
    env_logger::Builder::default()
        .filter_level(LevelFilter::Error)
        .parse_env(env_logger::Env::default().filter_or("DENSEMAT_LOG", "error"))
        .init();

    let matches = Command::new("densemat")
        .version(clap::crate_version!())
        .about("Dense matrix arithmetic on plain-text matrices")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(
            Command::new("eval")
                .about("Apply one operation to matrices read from text files")
                .arg(
                    Arg::new("op")
                        .help("Operation to apply")
                        .required(true)
                        .value_parser(Operation::NAMES),
                )
                .arg(
                    Arg::new("lhs")
                        .help("Left operand: text file with one row per line, or '-' for stdin")
                        .required(true)
                        .value_parser(clap::value_parser!(PathBuf))
                        .value_hint(ValueHint::FilePath),
                )
                .arg(
                    Arg::new("rhs")
                        .help("Right operand for add, sub, mul and matmul")
                        .required(false)
                        .value_parser(clap::value_parser!(PathBuf))
                        .value_hint(ValueHint::FilePath),
                )
                .arg(
                    Arg::new("scalar")
                        .short('s')
                        .long("scalar")
                        .help("Scalar right operand for add, sub and mul")
                        .allow_hyphen_values(true)
                        .value_parser(clap::value_parser!(f64)),
                )
                .arg(
                    Arg::new("exponent")
                        .short('e')
                        .long("exponent")
                        .help("Integer exponent for pow")
                        .allow_hyphen_values(true)
                        .value_parser(clap::value_parser!(i32)),
                )
                .arg(
                    Arg::new("config")
                        .short('c')
                        .long("config")
                        .help("JSON file with matrix product settings (see `densemat config`)")
                        .value_parser(clap::value_parser!(PathBuf))
                        .value_hint(ValueHint::FilePath),
                )
                .arg(
                    Arg::new("output_file")
                        .short('o')
                        .long("output")
                        .help("Write the result here instead of stdout")
                        .value_parser(clap::value_parser!(PathBuf))
                        .value_hint(ValueHint::FilePath),
                ),
        )
        .subcommand(
            Command::new("demo").about("Evaluate (A + B) @ (A - B)**2 for A = [[1, 2], [3, 4]], B = [5, 6]"),
        )
        .subcommand(
            Command::new("config").about("Print the default matrix product settings as JSON"),
        )
        .get_matches();

    match matches.subcommand() {
        Some(("eval", eval_matches)) => handle_eval(eval_matches),
        Some(("demo", _)) => handle_demo(),
        Some(("config", _)) => {
            println!("{}", serde_json::to_string_pretty(&ProductConfig::default())?);
            Ok(())
        }
        _ => unreachable!("Subcommand is required by CLI configuration"),
    }
}

fn handle_eval(matches: &ArgMatches) -> Result<()> {
    let op_name: &String = matches.get_one("op").unwrap();
    let op = Operation::from_str(op_name).map_err(anyhow::Error::msg)?;
    let lhs_path: &PathBuf = matches.get_one("lhs").unwrap();
    log::info!("[densemat::eval] {} on {:?}", op, lhs_path);

    let mut request = EvalRequest::new(op, read_matrix(lhs_path)?);
    if let Some(rhs_path) = matches.get_one::<PathBuf>("rhs") {
        request.rhs = Some(read_matrix(rhs_path)?);
    }
    request.scalar = matches.get_one::<f64>("scalar").copied();
    request.exponent = matches.get_one::<i32>("exponent").copied();
    if let Some(config_path) = matches.get_one::<PathBuf>("config") {
        log::info!("[densemat::eval] Using config: {:?}", config_path);
        request.config = load_product_config(config_path)?;
    }

    let result = evaluate(&request)?;
    let output: Option<&PathBuf> = matches.get_one("output_file");
    write_matrix(&result, output.map(PathBuf::as_path))
}

fn handle_demo() -> Result<()> {
    let (a, b) = demo_operands()?;
    let result = demo_expression(&a, &b)?;
    println!("A =\n{}\n", a);
    println!("B =\n{}\n", b);
    println!("(A + B) @ (A - B)**2 =\n{}", result);
    Ok(())
}
