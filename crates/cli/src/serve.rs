use console::style;
use esmock_core::{
    AtomFeedSimulator, ServerOptions, SimulatorOptions, start_server,
    testdata::create_test_events,
};

use crate::Context;

#[derive(Debug, Clone, PartialEq, clap::Args)]
pub struct ServeCommand {
    /// Address to bind
    #[arg(long, env = "ESMOCK_HOST", default_value = "127.0.0.1")]
    pub host: String,

    /// Port to run the server on
    #[arg(long, env = "ESMOCK_PORT", default_value = "2113")]
    pub port: u16,

    /// Serve a single generated stream instead of the manifest's streams
    #[arg(long, env = "ESMOCK_STREAM")]
    pub stream: Option<String>,

    /// Number of events generated for --stream
    #[arg(long, default_value = "100")]
    pub count: u64,

    /// Event type for generated events; repeat to rotate through several
    #[arg(long = "event-type")]
    pub event_types: Vec<String>,
}

impl ServeCommand {
    pub async fn execute(&self, ctx: &Context) -> Result<(), String> {
        println!();
        println!("{}", style("esmock").green());
        println!("{}", style("Starting Atom feed simulator").dim());
        println!();

        let options = ServerOptions {
            host: self.host.clone(),
            port: self.port,
        };
        let base_url = options.base_url();

        let (events, simulator_options) = match &self.stream {
            Some(stream) => {
                let event_types: Vec<&str> = self.event_types.iter().map(String::as_str).collect();
                (
                    create_test_events(self.count, stream, &base_url, &event_types),
                    SimulatorOptions::default(),
                )
            }
            None => (
                ctx.manifest.events(&base_url),
                ctx.manifest.simulator_options(),
            ),
        };

        let simulator = AtomFeedSimulator::new(events, simulator_options).map_err(|e| {
            format!(
                "{}\nDefine streams in {} or pass --stream <name>",
                e,
                ctx.manifest_path.display()
            )
        })?;

        println!("{}", style("Streams").dim());
        for stream in simulator.streams() {
            let count = simulator.events(stream).map(|e| e.len()).unwrap_or_default();
            println!(
                "  {} {}",
                style(format!("✓ {}", stream)).green(),
                style(format!("({} events)", count)).dim()
            );
        }
        println!();

        println!("{}", style("Endpoints").dim());
        for stream in simulator.streams() {
            println!("  GET {}/streams/{}", base_url, stream);
            println!("  GET {}/streams/{}/head/backward/20", base_url, stream);
            println!("  GET {}/streams/{}/metadata", base_url, stream);
        }
        println!();
        println!("{}", style("Press Ctrl+C to stop").dim());
        println!();

        start_server(simulator, options)
            .await
            .map_err(|e| format!("Server error: {}", e))
    }
}
