use clap::Parser;
use log::error;
use navmesh_knn::app::cli_args::CliArgs;
use navmesh_knn::app::run;

fn main() {
    env_logger::init();

    let args = CliArgs::parse();
    match run::command_line_runner(&args) {
        Ok(_) => {}
        Err(e) => {
            error!("{}", e);
            std::process::exit(1);
        }
    }
}
