//! Register a synthetic star field and print the recovered transform.

use nalgebra::Vector2;

use astralign::prelude::*;
use astralign::sim::{disturbed_pair, FieldCfg};

fn main() {
    let truth = transform_matrix(3.0, 0.4, Vector2::new(120.0, -40.0));
    let (source, target) = disturbed_pair(
        FieldCfg {
            points: 18,
            extras: 6,
            jitter: 0.002,
        },
        &truth,
        7,
    );
    let cfg = MatchCfg {
        tolerance: 0.05,
        ..MatchCfg::default()
    };
    match find_transform(&source, &target, &cfg) {
        Ok(Some(found)) => {
            println!("matched {} of {} target points", found.matched, target.len());
            println!("recovered:{:.4}", found.matrix);
            if let Ok(Some((refined, pairs))) = refine(&source, &target, &found.matrix, cfg.tolerance)
            {
                println!("refined over {} inliers:{:.4}", pairs.len(), refined);
            }
            println!("truth:{:.4}", truth);
        }
        Ok(None) => println!("no match"),
        Err(e) => eprintln!("error: {e}"),
    }
}
