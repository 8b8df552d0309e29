use std::path::PathBuf;

use clap::Parser;
use log::LevelFilter;
use log4rs::append::console::{ConsoleAppender, Target};
use log4rs::append::file::FileAppender;
use log4rs::config::{Appender, Config, Root};
use log4rs::encode::pattern::PatternEncoder;

use visual_stim::error::StimError;
use visual_stim::plot::{plot_electrode, plot_experimenter_bias};
use visual_stim::sampler::mock_stim_data;

#[derive(Parser, Debug)]
struct Args {
    /// The seed used for mock data sampling
    #[arg(long, default_value = "0")]
    seed: u64,
    /// The rat whose electrodes are plotted
    #[arg(long, default_value = "4")]
    rat_id: usize,
    /// The repetition whose electrodes are plotted
    #[arg(long, default_value = "2")]
    rep_number: usize,
    /// The electrodes to plot, in panel order (1 to 10)
    #[arg(long, value_delimiter = ',', default_value = "1,3,7")]
    electrodes: Vec<usize>,
    /// The directory where the figures are saved
    #[arg(long, default_value = ".")]
    output_dir: PathBuf,
    /// Print the experimenter statistics as JSON
    #[arg(long)]
    json: bool,
    /// Also write the log to this file
    #[arg(long)]
    log_file: Option<PathBuf>,
    /// Log debug messages
    #[arg(short, long)]
    verbose: bool,
}

fn init_logging(args: &Args) -> Result<(), StimError> {
    let pattern = "{l} - {m}\n";
    let level = if args.verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };

    let console = ConsoleAppender::builder()
        .target(Target::Stderr)
        .encoder(Box::new(PatternEncoder::new(pattern)))
        .build();
    let mut config = Config::builder().appender(Appender::builder().build("console", Box::new(console)));
    let mut root = Root::builder().appender("console");

    if let Some(log_path) = &args.log_file {
        let logfile = FileAppender::builder()
            .encoder(Box::new(PatternEncoder::new(pattern)))
            .build(log_path)
            .map_err(|e| StimError::IOError(e.to_string()))?;
        config = config.appender(Appender::builder().build("logfile", Box::new(logfile)));
        root = root.appender("logfile");
    }

    let config = config
        .build(root.build(level))
        .map_err(|e| StimError::IOError(e.to_string()))?;
    log4rs::init_config(config).map_err(|e| StimError::IOError(e.to_string()))?;
    Ok(())
}

fn main() -> Result<(), StimError> {
    let args = Args::parse();
    init_logging(&args)?;
    log::info!("{:?}", args);

    let stim_data = mock_stim_data(args.seed)?;
    log::info!("Mock data sampling done! Experimenters: {:?}", stim_data.experimenters());

    std::fs::create_dir_all(&args.output_dir)?;

    let electrode_path = args.output_dir.join(format!(
        "rat{}_rep{}_electrodes.png",
        args.rat_id, args.rep_number
    ));
    plot_electrode(
        &stim_data,
        args.rat_id,
        args.rep_number,
        &args.electrodes,
        &electrode_path,
    )?;

    let bias = stim_data.experimenter_bias();
    for group in bias.groups.iter() {
        match &group.stats {
            Some(stats) => log::info!(
                "{}: {} rats, mean {:.4}, std {:.4}, median {:.4}",
                group.experimenter,
                group.num_subjects,
                stats.mean,
                stats.std,
                stats.median
            ),
            None => log::info!("{}: no rat recorded", group.experimenter),
        }
    }
    if args.json {
        let summary =
            serde_json::to_string_pretty(&bias).map_err(|e| StimError::IOError(e.to_string()))?;
        println!("{}", summary);
    }

    plot_experimenter_bias(&bias, &args.output_dir.join("experimenter_bias.png"))?;
    Ok(())
}
