//! `linkgrab run`: wire every component and poll Telegram until a signal
//! or the admin `/shutdown` command cancels the shared token.

use std::sync::Arc;

use anyhow::{Context, Result};
use linkgrab_channels::{
    build_bot, ChannelAdapter, ChatTransport, CoordinatorDeps, InboundRouter, LinkCoordinator,
    PendingSelections, RouterDeps, TelegramAdapter, TelegramTransport, UploadPipeline,
    AdminNotifier,
};
use linkgrab_commands::build_dispatcher;
use linkgrab_i18n::Catalog;
use linkgrab_infra::{LanguageStore, StatsStore};
use linkgrab_media::{Downloader, Extractor, TitleExtractor, YtDlp};
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use crate::settings::Settings;

pub async fn run(settings: Settings) -> Result<()> {
    info!(
        admins = settings.admins.len(),
        yt_dlp = %settings.yt_dlp.display(),
        temp_dir = %settings.downloads.temp_dir.display(),
        gist = settings.gist.is_some(),
        "Starting linkgrab"
    );

    let catalog = Arc::new(Catalog::validated().context("String catalog is incomplete")?);
    let languages = Arc::new(LanguageStore::open(settings.language_file.clone()).await);
    let stats = Arc::new(StatsStore::open(settings.stats_file.clone(), settings.gist.clone()).await);

    let bot = build_bot(&settings.token, settings.api_url.as_deref())?;
    let transport: Arc<dyn ChatTransport> = Arc::new(TelegramTransport::new(bot.clone()));

    let extractor: Arc<dyn Extractor> = Arc::new(YtDlp::new(settings.yt_dlp.clone()));
    let downloader = Arc::new(Downloader::new(extractor.clone(), settings.downloads.clone()));
    let titles = Arc::new(TitleExtractor::new(extractor, settings.metadata_timeout));

    let notifier = Arc::new(AdminNotifier::new(
        transport.clone(),
        settings.admins.first().copied(),
        settings.admin_utc_offset_hours,
    ));
    let pipeline = UploadPipeline::new(
        transport.clone(),
        catalog.clone(),
        stats.clone(),
        notifier.clone(),
        settings.promo_channels.clone(),
    );

    let shutdown = CancellationToken::new();
    let coordinator = LinkCoordinator::new(CoordinatorDeps {
        transport: transport.clone(),
        catalog: catalog.clone(),
        languages: languages.clone(),
        stats: stats.clone(),
        downloader,
        titles,
        pipeline,
        pending: PendingSelections::default(),
        shutdown: shutdown.clone(),
        max_upload_bytes: settings.max_upload_bytes,
    });

    let mut dispatcher = build_dispatcher(catalog.clone(), stats.clone());
    let limited: Vec<String> = dispatcher
        .registry()
        .all()
        .iter()
        .filter(|def| def.rate_limit.is_some())
        .map(|def| def.key.to_string())
        .collect();
    for key in limited {
        dispatcher.registry_mut().set_rate_limit(&key, settings.command_limit);
    }

    let router = Arc::new(InboundRouter::new(RouterDeps {
        transport,
        catalog,
        languages,
        stats,
        dispatcher,
        coordinator,
        notifier,
        admins: settings.admins.clone(),
        shutdown: shutdown.clone(),
    }));

    spawn_signal_listener(shutdown.clone());

    let adapter = TelegramAdapter::new(bot);
    info!(adapter = adapter.name(), "Channel adapter starting");
    let result = adapter.start(router, shutdown.clone()).await;
    // polling may end on its own; make sure in-flight requests stop too
    shutdown.cancel();
    result?;

    info!("linkgrab stopped");
    Ok(())
}

/// Cancel `token` on Ctrl-C or SIGTERM.
fn spawn_signal_listener(token: CancellationToken) {
    tokio::spawn(async move {
        #[cfg(unix)]
        let terminate = async {
            use tokio::signal::unix::{signal, SignalKind};
            match signal(SignalKind::terminate()) {
                Ok(mut stream) => {
                    stream.recv().await;
                }
                Err(e) => {
                    warn!("Cannot listen for SIGTERM: {}", e);
                    std::future::pending::<()>().await;
                }
            }
        };
        #[cfg(not(unix))]
        let terminate = std::future::pending::<()>();

        tokio::select! {
            _ = tokio::signal::ctrl_c() => info!("Received Ctrl-C, shutting down"),
            _ = terminate => info!("Received SIGTERM, shutting down"),
            _ = token.cancelled() => return,
        }
        token.cancel();
    });
}
