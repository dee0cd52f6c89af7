use scenery_strips::adjacency::AdjacencyScan;
use scenery_strips::stripify::{StripOptions, Strips, analyze_strips, detect_strips_with};

use std::error::Error;
use std::time::Instant;

fn load_triangles(path: &str) -> Result<Vec<(String, Vec<[u32; 3]>)>, tobj::LoadError> {
    let (models, _materials) = tobj::load_obj(
        path,
        &tobj::LoadOptions {
            triangulate: true,
            ..Default::default()
        },
    )?;

    Ok(models
        .into_iter()
        .map(|model| {
            let triangles = model
                .mesh
                .indices
                .chunks_exact(3)
                .map(|t| [t[0], t[1], t[2]])
                .collect();

            (model.name, triangles)
        })
        .collect())
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();

    let args: Vec<String> = std::env::args().skip(1).collect();

    let verbose = args.iter().any(|a| a == "-v");
    let scan = if args.iter().any(|a| a == "--exhaustive") {
        AdjacencyScan::Exhaustive
    } else {
        AdjacencyScan::Indexed
    };

    let options = StripOptions { scan };

    println!("File\tModel\tTris\tStrips\tStripped\tResidual\tTris/strip\tIdx/tri\tms");

    for path in args.iter().filter(|a| !a.starts_with('-')) {
        for (name, mut triangles) in load_triangles(path)? {
            let before = triangles.len();

            // OBJ exporters emit collapsed faces from time to time; they can't be part of a strip anyway
            triangles.retain(|[a, b, c]| a != b && b != c && c != a);

            if verbose && triangles.len() != before {
                println!("{}: dropped {} degenerate triangles", name, before - triangles.len());
            }

            let mut strips = Strips::new();

            let t0 = Instant::now();
            let residual = detect_strips_with(&mut triangles, &mut strips, &options)?;
            let time = t0.elapsed().as_secs_f64();

            let stats = analyze_strips(&strips, residual);

            println!(
                "{}\t{}\t{}\t{}\t{}\t{}\t{:.2}\t{:.3}\t{:.2}",
                path,
                name,
                stats.stripped_triangles + stats.residual_triangles,
                stats.strip_count,
                stats.stripped_triangles,
                stats.residual_triangles,
                stats.triangles_per_strip,
                stats.indices_per_triangle,
                time * 1_000.0
            );

            if verbose {
                for (i, strip) in strips.iter().enumerate() {
                    println!("  strip {}: {:?}", i, strip);
                }
            }
        }
    }

    Ok(())
}
