use std::panic;

use time::format_description::well_known::Rfc3339;
use tracing::{error, Level, Subscriber};
use tracing_subscriber::{
    fmt::{time::LocalTime, writer::MakeWriterExt, MakeWriter},
    prelude::__tracing_subscriber_SubscriberExt,
    registry::LookupSpan,
    EnvFilter, Layer,
};

type BoxedSubscriber = Box<dyn Subscriber + Send + Sync>;

const WITH_SOURCE_LOCATION: bool = cfg!(debug_assertions);

fn log_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        let level = if cfg!(debug_assertions) {
            "trace"
        } else {
            "info"
        };
        EnvFilter::new(format!("parcheat={level},parcheat_lib={level}"))
    })
}

fn fmt_layer<S, W>(writer: W, ansi: bool) -> impl Layer<S>
where
    S: Subscriber + for<'span> LookupSpan<'span>,
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    tracing_subscriber::fmt::layer()
        .compact()
        .with_ansi(ansi)
        .with_file(WITH_SOURCE_LOCATION)
        .with_line_number(WITH_SOURCE_LOCATION)
        .with_target(!WITH_SOURCE_LOCATION)
        .with_thread_ids(true)
        .with_timer(LocalTime::new(Rfc3339))
        .with_writer(writer)
        .with_filter(log_filter())
}

/// Console output through `console`, plus warnings and above appended to
/// `log_dir/file_name` when a log directory is configured.
fn build_subscriber<W>(
    log_dir: Option<&str>,
    file_name: &str,
    ansi: bool,
    console: W,
) -> BoxedSubscriber
where
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    let registry = tracing_subscriber::registry().with(fmt_layer(console, ansi));
    let Some(dir) = log_dir else {
        return Box::new(registry);
    };
    let log_file = tracing_appender::rolling::never(dir, file_name).with_max_level(Level::WARN);
    Box::new(registry.with(fmt_layer(log_file, false)))
}

pub fn init_tracing(log_dir: Option<&str>, file_name: &str, ansi: bool) {
    let subscriber = build_subscriber(log_dir, file_name, ansi, std::io::stderr);
    if let Err(err) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("failed to init tracing: {}", err);
        return;
    }
    panic::set_hook(Box::new(|panic| error!("{}", panic)));
}
