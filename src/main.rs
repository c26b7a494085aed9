use clap::Parser;
use figment::{
    providers::{Env, Format, Json},
    Figment,
};
use log::{error, info};
use practicum_hw_notify::{
    message_sender::TelegramSender,
    models::{Args, Config},
    run_tool::run,
    status_getter::PracticumClient,
};

#[tokio::main]
async fn main() {
    /* Setup logging */
    env_logger::builder()
        .target(env_logger::Target::Stdout)
        .filter_level(log::LevelFilter::Debug)
        .init();

    /* Get all the required resources */
    let args = Args::parse();
    let config: Config = match Figment::new()
        .merge(Json::file(&args.config_json_path))
        .merge(Env::raw().only(&["practicum_token", "telegram_token", "telegram_chat_id"]))
        .extract()
    {
        Ok(config) => config,
        Err(figment_error) => {
            error!("Failed to read configuration: {}", figment_error);
            std::process::exit(1);
        }
    };

    /* Refuse to start without credentials, before any network call */
    let missing = config.missing_credentials();
    if !missing.is_empty() {
        error!(
            "Missing mandatory environment variables: {}",
            missing.join(", ")
        );
        std::process::exit(1);
    }

    let http_client = reqwest::Client::new();
    let getter = PracticumClient::new(http_client.clone(), &config.practicum_token);
    let sender = TelegramSender::new(
        http_client,
        &config.telegram_token,
        &config.telegram_chat_id,
    );

    info!("Starting homework status polling");
    run(getter, sender).await;
}
