//! Goal-based command line front-end for the SymNMF pipeline.
//!
//! `symnmf <k> <sym|ddg|norm|symnmf> <file>` reads a headerless
//! comma-separated file of points and prints the matrix the requested
//! pipeline stage produces, one row per line with entries formatted to 4
//! decimal places.

use std::env;
use std::error::Error;
use std::fs::File;
use std::process;

use csv::ReaderBuilder;
use ndarray::Array2;
use ndarray_csv::Array2Reader;

use symclust::similarity::{degree, normalized, similarity};
use symclust::traits::Fit;
use symclust::SymNmf;

fn load_points(path: &str) -> Result<Array2<f64>, Box<dyn Error>> {
    let file = File::open(path)?;
    let mut reader = ReaderBuilder::new().has_headers(false).from_reader(file);
    Ok(reader.deserialize_array2_dynamic()?)
}

fn print_matrix(matrix: &Array2<f64>) {
    for row in matrix.rows() {
        let line = row
            .iter()
            .map(|entry| format!("{:.4}", entry))
            .collect::<Vec<_>>()
            .join(",");
        println!("{}", line);
    }
}

fn run() -> Result<(), Box<dyn Error>> {
    let args: Vec<String> = env::args().collect();
    if args.len() != 4 {
        return Err(format!("usage: {} <k> <sym|ddg|norm|symnmf> <file>", args[0]).into());
    }
    let n_clusters: usize = args[1].parse()?;
    let points = load_points(&args[3])?;

    match args[2].as_str() {
        "sym" => print_matrix(&similarity(&points)),
        "ddg" => print_matrix(&degree(&points)),
        "norm" => print_matrix(&normalized(&points)?),
        "symnmf" => {
            let model = SymNmf::params(n_clusters).fit(&points)?;
            print_matrix(model.factors());
        }
        goal => return Err(format!("unknown goal {:?}", goal).into()),
    }
    Ok(())
}

fn main() {
    if let Err(error) = run() {
        eprintln!("{}", error);
        process::exit(1);
    }
}
