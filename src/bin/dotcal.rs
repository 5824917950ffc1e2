extern crate dotcal as lib;

use flexi_logger::{FileSpec, Logger};
use lib::datetime::MonthIndex;
use lib::events::Dispatcher;
use lib::ui::app::App;
use lib::ui::mouse::MouseCapture;
use lib::ui::{render_plain, Context, Glyphs};
use nix::sys::termios;
use std::io::stdout;
use std::path::PathBuf;
use structopt::StructOpt;
use unsegen::base::Terminal;

#[derive(Debug, StructOpt)]
#[structopt(
    name = "dotcal",
    author = "Julian Bigge <j.reedts@gmail.com>",
    about = "A month of dots and the momentum of today."
)]
pub struct Args {
    #[structopt(
        name = "CONFIG",
        short = "c",
        long = "config",
        help = "path to config file",
        parse(from_os_str)
    )]
    pub configfile: Option<PathBuf>,

    #[structopt(
        short = "s",
        long = "show",
        help = "print a single frame and exit"
    )]
    pub show: bool,

    #[structopt(short = "m", long = "month", help = "month to start on, as YYYY-MM")]
    pub month: Option<MonthIndex>,

    #[structopt(long = "log-file", help = "path to log file", parse(from_os_str))]
    pub log_file: Option<PathBuf>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::from_args();

    const DEFAULT_LOG_LEVEL: &'static str = if cfg!(debug_assertions) {
        "debug"
    } else {
        "info"
    };

    // stderr belongs to the terminal UI, so only log with a log file.
    let logger = if let Some(log_file) = args.log_file.as_ref() {
        Logger::try_with_env_or_str(DEFAULT_LOG_LEVEL)?
            .log_to_file(FileSpec::try_from(log_file)?)
            .print_message()
    } else {
        Logger::try_with_str("off")?
    };

    let _logger = logger.start()?;

    let config = lib::config::load_suitable_config(args.configfile.as_deref())?;
    let context = Context::starting_at(args.month);

    if args.show {
        print!(
            "{}",
            render_plain(context.view(), &Glyphs::materialize(config.glyphs))
        );
        return Ok(());
    }

    const STDOUT: std::os::unix::io::RawFd = 0;
    let orig_attr = std::sync::Mutex::new(
        termios::tcgetattr(STDOUT).expect("Failed to get terminal attributes"),
    );

    let mouse = if config.mouse {
        Some(MouseCapture::enable(stdout())?)
    } else {
        None
    };
    let mouse_release = mouse.as_ref().map(MouseCapture::release_handle);

    std::panic::set_hook(Box::new(move |info| {
        if let Some(mouse) = mouse_release.as_ref() {
            mouse.release();
        }

        // Switch to main terminal screen
        println!("{}{}", termion::screen::ToMainScreen, termion::cursor::Show);

        if let Ok(attr) = orig_attr.lock() {
            let _ = termios::tcsetattr(STDOUT, termios::SetArg::TCSANOW, &attr);
        }

        println!("dotcal ran into a fatal error!");
        println!("Consider filing an issue with a log file and the backtrace below.");

        println!("{}", info);
        println!("{:?}", backtrace::Backtrace::new());
    }));

    let dispatcher = Dispatcher::from_config(&config);

    // Setup unsegen terminal
    let stdout = stdout();
    let term = Terminal::new(stdout.lock())?;

    let mut app = App::new(&config, context);

    app.run(dispatcher, term)
}
