use std::fs::File;
use std::path::Path;
use std::sync::Arc;

use itertools::Itertools;
use log::{info, warn};
use rayon::prelude::*;

use navmesh_knn_core::algorithm::search::knn::{DamTable, KnnSearch};
use navmesh_knn_core::algorithm::search::SearchInstance;
use navmesh_knn_core::model::geometry::Point;
use navmesh_knn_core::model::mesh::Mesh;
use navmesh_knn_core::model::termination::TerminationModel;
use navmesh_knn_core::util::fs::read_utils;

use super::app_error::AppError;
use super::cli_args::{CliArgs, Command, EngineKind};

const COMPARE_EPSILON: f64 = 1e-6;

pub fn command_line_runner(args: &CliArgs) -> Result<(), AppError> {
    match &args.command {
        Command::Run {
            mesh,
            goals,
            starts,
            k,
            engine,
            time_limit_micros,
            paths,
            json,
        } => run_engine(
            mesh,
            goals,
            starts,
            *k,
            *engine,
            *time_limit_micros,
            *paths,
            *json,
        ),
        Command::Compare {
            mesh,
            goals,
            starts,
            k,
        } => compare_engines(mesh, goals, starts, *k),
    }
}

fn load_mesh(path: &Path) -> Result<Arc<Mesh>, AppError> {
    let file = File::open(path)?;
    let mesh = Mesh::from_reader(file).map_err(|source| AppError::MeshFailure {
        path: path.display().to_string(),
        source,
    })?;
    Ok(Arc::new(mesh))
}

fn load_points(path: &Path) -> Result<Vec<Point>, AppError> {
    read_utils::points_from_file(path).map_err(|source| AppError::PointsFailure {
        path: path.display().to_string(),
        source,
    })
}

fn build_engine(
    kind: EngineKind,
    mesh: &Arc<Mesh>,
    dam_table: &Option<Arc<DamTable>>,
) -> KnnSearch {
    match (kind, dam_table) {
        (EngineKind::Blind, _) => KnnSearch::blind(mesh.clone()),
        (EngineKind::Target, _) => KnnSearch::target(mesh.clone()),
        (EngineKind::Fence, Some(table)) => KnnSearch::fence_with_table(mesh.clone(), table.clone()),
        (EngineKind::Fence, None) => KnnSearch::fence(mesh.clone()),
    }
}

#[allow(clippy::too_many_arguments)]
fn run_engine(
    mesh_path: &Path,
    goals_path: &Path,
    starts_path: &Path,
    k: usize,
    kind: EngineKind,
    time_limit_micros: Option<u64>,
    print_paths: bool,
    json: bool,
) -> Result<(), AppError> {
    let mesh = load_mesh(mesh_path)?;
    let goals = load_points(goals_path)?;
    let starts = load_points(starts_path)?;

    // one precompute shared by every query of a fence run
    let dam_table = match kind {
        EngineKind::Fence => {
            let table = Arc::new(DamTable::build(&mesh, &goals));
            info!(
                "dam table: {} dams over {} interior edges in {:.0} micros",
                table.dam_count,
                table.edge_count,
                table.build_micros()
            );
            Some(table)
        }
        _ => None,
    };

    info!(
        "engine {} answering {} queries, {} goals, k = {}",
        kind,
        starts.len(),
        goals.len(),
        k
    );

    let rows: Vec<String> = starts
        .par_iter()
        .map(|start| {
            let mut engine = build_engine(kind, &mesh, &dam_table);
            engine.set_start(*start);
            engine.set_goals(&goals);
            engine.set_k(k);
            if let Some(limit) = time_limit_micros {
                engine.set_termination(TerminationModel::from_micros(limit));
            }
            let sealed = engine.search();
            if json {
                let results: Vec<serde_json::Value> = (0..sealed)
                    .map(|i| {
                        let mut entry = serde_json::json!({
                            "gid": engine.gid(i).expect("sealed result has a gid"),
                            "cost": engine.cost(i).expect("sealed result has a cost"),
                        });
                        if print_paths {
                            let polyline: Vec<[f64; 2]> =
                                engine.path(i).iter().map(|p| [p.x, p.y]).collect();
                            entry["path"] = serde_json::json!(polyline);
                        }
                        entry
                    })
                    .collect();
                serde_json::json!({
                    "start": [start.x, start.y],
                    "sealed": sealed,
                    "micros": engine.search_micros(),
                    "generated": engine.nodes_generated,
                    "results": results,
                })
                .to_string()
            } else {
                let results = (0..sealed)
                    .map(|i| {
                        format!(
                            "{}:{:.6}",
                            engine.gid(i).expect("sealed result has a gid"),
                            engine.cost(i).expect("sealed result has a cost")
                        )
                    })
                    .join(",");
                let mut row = format!(
                    "{:.6},{:.6},{},{:.0},{},{}",
                    start.x,
                    start.y,
                    sealed,
                    engine.search_micros(),
                    engine.nodes_generated,
                    results
                );
                if print_paths {
                    for i in 0..sealed {
                        let polyline = engine
                            .path(i)
                            .iter()
                            .map(|p| format!("{:.6} {:.6}", p.x, p.y))
                            .join("; ");
                        row.push_str(&format!("\npath {}: {}", i, polyline));
                    }
                }
                row
            }
        })
        .collect();

    if !json {
        println!("start_x,start_y,sealed,micros,generated,results");
    }
    for row in rows {
        println!("{}", row);
    }
    Ok(())
}

fn compare_engines(
    mesh_path: &Path,
    goals_path: &Path,
    starts_path: &Path,
    k: usize,
) -> Result<(), AppError> {
    let mesh = load_mesh(mesh_path)?;
    let goals = load_points(goals_path)?;
    let starts = load_points(starts_path)?;

    let dam_table = Arc::new(DamTable::build(&mesh, &goals));
    let mut oracle = SearchInstance::new(mesh.clone());

    println!("start_x,start_y,k,dist,cost_blind,gen_blind,cost_target,gen_target,hcalls,cost_fence,gen_fence,cost_pre");
    for start in &starts {
        let expected = oracle.brute_force(*start, &goals, k);

        let mut blind = KnnSearch::blind(mesh.clone());
        let mut target = KnnSearch::target(mesh.clone());
        let mut fence = KnnSearch::fence_with_table(mesh.clone(), dam_table.clone());

        let mut all_ok = true;
        for engine in [&mut blind, &mut target, &mut fence] {
            engine.set_start(*start);
            engine.set_goals(&goals);
            engine.set_k(k);
            let sealed = engine.search();
            if sealed != expected.len() {
                all_ok = false;
                break;
            }
            for (i, (_, want)) in expected.iter().enumerate() {
                let got = engine.cost(i).unwrap_or(f64::INFINITY);
                if (got - want).abs() > COMPARE_EPSILON {
                    all_ok = false;
                    break;
                }
            }
            if !all_ok {
                break;
            }
        }

        if !all_ok {
            // dump the failing query so it can be replayed
            warn!("dumping mismatched query");
            eprintln!("mesh:   {}", mesh_path.display());
            eprintln!("goals:  {}", goals_path.display());
            eprintln!("starts: {}", starts_path.display());
            eprintln!("start:  {:.9} {:.9}", start.x, start.y);
            eprintln!("k:      {}", k);
            return Err(AppError::EngineMismatch {
                x: start.x,
                y: start.y,
                k,
            });
        }

        let dist = expected.last().map(|(_, c)| *c).unwrap_or(f64::NAN);
        println!(
            "{:.6},{:.6},{},{:.6},{:.0},{},{:.0},{},{},{:.0},{},{:.0}",
            start.x,
            start.y,
            k,
            dist,
            blind.search_micros(),
            blind.nodes_generated,
            target.search_micros(),
            target.nodes_generated,
            target.heuristic_calls,
            fence.search_micros(),
            fence.nodes_generated,
            dam_table.build_micros()
        );
    }
    info!("all {} queries agree across engines", starts.len());
    Ok(())
}
