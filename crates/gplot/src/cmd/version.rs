use crate::cmd::VersionArgs;
use crate::exit::{CliResult, SUCCESS};

pub fn run(args: VersionArgs) -> CliResult<i32> {
    if !args.extended {
        println!("gplot {}", env!("CARGO_PKG_VERSION"));
        return Ok(SUCCESS);
    }

    println!("name: gplot");
    println!("version: {}", env!("CARGO_PKG_VERSION"));
    println!(
        "target: {}",
        option_env!("GPLOT_BUILD_TARGET").unwrap_or("unknown")
    );
    println!("wire_format: {}", gplot_wire::BINARY_FORMAT_INIT);
    println!(
        "gnuplot_env: {}",
        std::env::var("GPLOT_GNUPLOT").unwrap_or_else(|_| "unset".to_string())
    );

    Ok(SUCCESS)
}
