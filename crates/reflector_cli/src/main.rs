#![allow(missing_docs)]

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use reflector::reflect::CodingStyle;
use tracing_subscriber::EnvFilter;

mod cmd;

#[derive(Parser)]
#[command(name = "reflector", about = "Object factory, coercion, and field injection over a demo type registry")]
struct Cli {
	/// Raise log verbosity (`-v` debug, `-vv` trace). `RUST_LOG` is honoured too.
	#[arg(short, long, action = clap::ArgAction::Count, global = true)]
	verbose: u8,
	#[command(subcommand)]
	command: Commands,
}

#[derive(Subcommand)]
enum Commands {
	/// List registered classes, enums, and interfaces.
	Types {
		#[arg(long)]
		json: bool,
	},
	/// Parse text into a type.
	Coerce {
		#[arg(value_name = "TYPE")]
		ty: String,
		text: String,
		#[arg(long)]
		json: bool,
	},
	/// Build a default instance or array.
	New {
		#[arg(value_name = "TYPE")]
		ty: String,
		#[arg(long)]
		len: Option<usize>,
		#[arg(long)]
		json: bool,
	},
	/// Inject a JSON value into a new instance.
	Inject {
		#[arg(value_name = "TYPE")]
		ty: String,
		/// JSON file, or `-` for stdin.
		input: PathBuf,
		/// JSON file holding injection options.
		#[arg(long)]
		options: Option<PathBuf>,
		#[arg(long, value_enum)]
		style: Option<StyleArg>,
		#[arg(long)]
		strict: bool,
		#[arg(long)]
		no_force: bool,
		#[arg(long)]
		no_super: bool,
		#[arg(long)]
		inherited: bool,
		#[arg(long)]
		json: bool,
	},
	/// Infer the rank of a JSON list, optionally converting it to an array type.
	Rank {
		list: String,
		#[arg(long = "as", value_name = "TYPE")]
		as_type: Option<String>,
		#[arg(long)]
		fail: bool,
		#[arg(long)]
		json: bool,
	},
}

#[derive(Clone, Copy, ValueEnum)]
enum StyleArg {
	Camel,
	Snake,
}

impl From<StyleArg> for CodingStyle {
	fn from(value: StyleArg) -> Self {
		match value {
			StyleArg::Camel => CodingStyle::CamelCase,
			StyleArg::Snake => CodingStyle::SnakeCase,
		}
	}
}

fn main() {
	let cli = Cli::parse();
	init_tracing(cli.verbose);

	if let Err(err) = run(cli.command) {
		eprintln!("error: {err}");
		std::process::exit(1);
	}
}

fn init_tracing(verbose: u8) {
	let level = match verbose {
		0 => tracing::Level::WARN,
		1 => tracing::Level::DEBUG,
		_ => tracing::Level::TRACE,
	};
	tracing_subscriber::fmt()
		.with_env_filter(EnvFilter::from_default_env().add_directive(level.into()))
		.with_writer(std::io::stderr)
		.with_target(false)
		.init();
}

fn run(command: Commands) -> reflector::reflect::Result<()> {
	let registry = cmd::demo::registry()?;

	match command {
		Commands::Types { json } => cmd::types::run(&registry, json),
		Commands::Coerce { ty, text, json } => cmd::coerce::run(&registry, &ty, &text, json),
		Commands::New { ty, len, json } => cmd::new::run(&registry, &ty, len, json),
		Commands::Inject {
			ty,
			input,
			options,
			style,
			strict,
			no_force,
			no_super,
			inherited,
			json,
		} => {
			let flags = cmd::inject::InjectFlags {
				options,
				style: style.map(CodingStyle::from),
				strict,
				no_force,
				no_super,
				inherited,
			};
			cmd::inject::run(&registry, &ty, input, flags, json)
		}
		Commands::Rank { list, as_type, fail, json } => cmd::rank::run(&registry, &list, as_type.as_deref(), fail, json),
	}
}
