//! Silhouette comparison of the two clustering engines.
//!
//! `analysis <k> <file>` reads a headerless comma-separated file of points,
//! clusters it with both SymNMF and K-means and prints the silhouette score
//! of each method.

use std::env;
use std::error::Error;
use std::fs::File;
use std::process;

use csv::ReaderBuilder;
use ndarray::Array2;
use ndarray_csv::Array2Reader;

use symclust::analysis::compare;

const MAX_N_ITERATIONS: u64 = 300;
const TOLERANCE: f64 = 1e-4;

fn load_points(path: &str) -> Result<Array2<f64>, Box<dyn Error>> {
    let file = File::open(path)?;
    let mut reader = ReaderBuilder::new().has_headers(false).from_reader(file);
    Ok(reader.deserialize_array2_dynamic()?)
}

fn run() -> Result<(), Box<dyn Error>> {
    let args: Vec<String> = env::args().collect();
    if args.len() != 3 {
        return Err(format!("usage: {} <k> <file>", args[0]).into());
    }
    let n_clusters: usize = args[1].parse()?;
    let points = load_points(&args[2])?;

    let scores = compare(&points, n_clusters, MAX_N_ITERATIONS, TOLERANCE)?;
    println!("nmf: {:.4}", scores.sym_nmf);
    println!("kmeans: {:.4}", scores.k_means);
    Ok(())
}

fn main() {
    if let Err(error) = run() {
        eprintln!("{}", error);
        process::exit(1);
    }
}
