use std::path::Path;

use curvescope::options::Options;
use curvescope::viewer;

fn main() {
    env_logger::init();

    let config_path = std::env::args().nth(1);
    let options =
        Options::load_or_default(config_path.as_deref().map(Path::new));

    if let Err(e) = viewer::run(options) {
        log::error!("{e}");
        std::process::exit(1);
    }
}
