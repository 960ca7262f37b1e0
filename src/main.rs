use clap::Parser;
use env_logger::Env;
use geo_divide::export::partition_to_geojson;
use geo_divide::nested::NestedShapes;
use geo_divide::shapes::ShapeTable;
use geo_divide::{Dataset, Partitioner};
use geojson::GeoJson;
use log::info;
use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Divide group of OSM multipolygons into connected parts of similar area",
    long_about = None
)]
struct Args {
    /// Input OSM JSON file
    #[arg(short, long)]
    file: PathBuf,

    /// Repeat n times (you will get 2^n parts)
    #[arg(short, long, default_value_t = 1)]
    num: u32,

    /// Show debug messages
    #[arg(short, long, default_value_t = false)]
    debug: bool,

    /// Also write the parts as GeoJSON polygons
    #[arg(long)]
    geojson: Option<PathBuf>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let level = if args.debug { "debug" } else { "info" };
    env_logger::Builder::from_env(Env::default().default_filter_or(level)).try_init()?;

    info!("read OSM file");
    let dataset = Dataset::from_path(&args.file)?;
    let shapes = ShapeTable::from_dataset(&dataset)?;
    let nested = NestedShapes::resolve(&dataset)?;

    let partition = Partitioner::new()
        .with_rounds(args.num)
        .divide(&shapes, &nested)?;

    if let Some(path) = &args.geojson {
        let collection = partition_to_geojson(&partition, &shapes, &dataset)?;
        let writer = BufWriter::new(File::create(path)?);
        serde_json::to_writer_pretty(writer, &GeoJson::FeatureCollection(collection))?;
        info!("wrote {:?}", path);
    }

    info!("print result");
    print!("{}", partition);

    info!("finish");
    Ok(())
}
