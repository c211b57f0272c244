use tracegen::core::config::GeneratorConfig;
use tracegen::core::generator::TraceGenerator;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // RUST_LOG overrides the default level
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp(None)
        .init();

    let mut generator = TraceGenerator::new(GeneratorConfig::default())?;
    generator.run()?;
    Ok(())
}
