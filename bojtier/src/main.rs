mod app;
mod arguments;
mod error;
mod help;
mod logging;

use help::Palette;

fn main() {
    logging::init();

    let palette = Palette::from_env();
    println!("{} {}", palette.app_name(), help::APP_VERSION);

    let invocation = match arguments::parse_args(std::env::args().skip(1)) {
        Ok(invocation) => invocation,
        Err(e) => {
            tracing::debug!(error = ?e, "rejected command line");
            let _ = app::report(&e, &mut std::io::stderr().lock(), &palette);
            std::process::exit(1);
        }
    };

    if let Err(e) = app::run(&invocation, &mut std::io::stdout().lock(), &palette) {
        eprintln!("{}: {}", palette.error(), e);
        std::process::exit(1);
    }
}
