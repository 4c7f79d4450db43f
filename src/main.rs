#[macro_use]
extern crate log;

use chequer::application::{RenderLoop, Settings};
use chequer::errors::Result;

fn run() -> Result<()> {
    let settings = Settings::load_default()?;
    let mut app = RenderLoop::new(&settings)?;
    app.run()
}

fn main() {
    env_logger::init();

    if let Err(err) = run() {
        error!("{}", err);
        for cause in err.iter_causes() {
            error!("Caused by: {}", cause);
        }

        ::std::process::exit(1);
    }
}
