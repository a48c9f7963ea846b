//! Tiketin CLI
//!
//! Command-line interface to the Tiketin ticketing API:
//! - Browse and search events
//! - Manage events as an organizer
//! - Show and update the profile
//! - Log in, register, book tickets and list past bookings

use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::{Path, PathBuf};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use tiketin::config::{generate_default_config, LoggingConfig};
use tiketin::{
    ApiClient, ApiError, AuthContext, BookingRequest, BookingSummary, Catalog, Channel,
    ChannelGroup, Config, Credentials, Event, EventDraft, EventId, FileTokenStore, FileUpload,
    MultipartForm, NotificationPreferences, Registration, ReqwestTransport, Role,
};

#[derive(Parser)]
#[command(name = "tiketin")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Browse events and manage tickets from the terminal")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// API base URL (overrides config)
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    /// Config file (default: ~/.config/tiketin/config.toml or ./tiketin.toml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table", global = true)]
    pub format: OutputFormat,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Table,
    Json,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Browse and manage events
    Events {
        #[command(subcommand)]
        command: EventCommands,
    },

    /// Show or update your profile
    Profile {
        #[command(subcommand)]
        command: ProfileCommands,
    },

    /// Log in and store the issued token
    Login {
        /// Email or username
        identifier: String,
        #[arg(short, long)]
        password: String,
    },

    /// Create an account
    Register {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
        /// user (attendee) or admin (organizer)
        #[arg(long, default_value = "user")]
        role: Role,
    },

    /// Forget the stored token
    Logout,

    /// Book tickets for an event
    Book {
        event_id: EventId,
        #[arg(short, long, default_value = "1")]
        quantity: u32,
    },

    /// List your bookings (needs `api.my_bookings_path` in the config)
    Bookings,

    /// Show the default notification preferences
    Notifications,

    /// Generate default config file
    Config {
        /// Output path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[derive(Subcommand)]
pub enum EventCommands {
    /// List events, optionally filtered by title, location or tag
    List {
        /// Search query
        #[arg(short, long)]
        search: Option<String>,
        /// Page number (15 events per page)
        #[arg(short, long, default_value = "1")]
        page: usize,
    },

    /// Show one event
    Show { id: EventId },

    /// Create an event (organizer)
    Create(EventArgs),

    /// Replace an event's fields (organizer)
    Update {
        id: EventId,
        #[command(flatten)]
        event: EventArgs,
    },

    /// Delete an event (organizer)
    Delete { id: EventId },
}

#[derive(clap::Args)]
pub struct EventArgs {
    #[arg(long)]
    title: String,
    /// Start, e.g. 2025-08-17T19:30
    #[arg(long)]
    date: String,
    #[arg(long)]
    location: String,
    #[arg(long, default_value = "")]
    venue: String,
    #[arg(long, default_value = "")]
    tag: String,
    #[arg(long, default_value = "")]
    description: String,
    #[arg(long)]
    capacity: String,
    /// Ticket price in Rupiah
    #[arg(long)]
    price: String,
    /// Poster image (jpg, png, gif)
    #[arg(long)]
    image: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum ProfileCommands {
    /// Show your profile
    Show,

    /// Submit profile fields
    Update {
        /// Fields in key=value format
        #[arg(short = 'F', long = "field")]
        fields: Vec<String>,
        /// New avatar image
        #[arg(long)]
        avatar: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => match Config::load_with_env(path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("Error: {}", e);
                std::process::exit(1);
            }
        },
        None => Config::load_default(),
    };
    if let Some(url) = &cli.api_url {
        config.api.base_url = url.clone();
    }

    init_logging(&config.logging);
    tracing::debug!("Tiketin CLI v{}", env!("CARGO_PKG_VERSION"));

    if let Err(e) = run(cli, config).await {
        eprintln!("Error: {:#}", e);
        if e.downcast_ref::<ApiError>().map(ApiError::is_auth).unwrap_or(false) {
            eprintln!();
            eprintln!("Log in first with:");
            eprintln!("  tiketin login <email-or-username> --password <password>");
        }
        std::process::exit(1);
    }
}

fn init_logging(config: &LoggingConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("tiketin={}", config.level)));

    let registry = tracing_subscriber::registry().with(filter);

    if config.format == "json" {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}

async fn run(cli: Cli, config: Config) -> anyhow::Result<()> {
    let transport = ReqwestTransport::new(config.api.request_timeout())?;
    let auth = AuthContext::new(FileTokenStore::new(&config.auth.token_file));
    let api = ApiClient::new(transport, auth, config.api.base_url.clone());
    let format = cli.format;

    match cli.command {
        Commands::Events { command } => match command {
            EventCommands::List { search, page } => {
                let mut catalog = Catalog::new(api.list_events().await?);
                if let Some(query) = search {
                    catalog.set_query(query);
                }
                catalog.go_to_page(page);

                let items = catalog.page_items();
                if format == OutputFormat::Json {
                    println!("{}", serde_json::to_string_pretty(&items)?);
                } else if items.is_empty() {
                    println!("No events found.");
                } else {
                    print_event_table(&items);
                    println!();
                    println!(
                        "Page {} / {} ({} events)",
                        catalog.page(),
                        catalog.page_count(),
                        catalog.filtered_len()
                    );
                }
            }

            EventCommands::Show { id } => {
                let event = api.get_event(id).await?;
                if format == OutputFormat::Json {
                    println!("{}", serde_json::to_string_pretty(&event)?);
                } else {
                    print_event_detail(&event);
                }
            }

            EventCommands::Create(args) => {
                let form = args.into_draft()?.validate()?;
                let receipt = api.create_event(&form).await?;
                match receipt.id {
                    Some(id) => println!("Created event {} ({})", id, form.title),
                    None => println!("{}", receipt.message.as_deref().unwrap_or("Event created")),
                }
            }

            EventCommands::Update { id, event } => {
                let form = event.into_draft()?.validate()?;
                let receipt = api.update_event(id, &form).await?;
                println!(
                    "{}",
                    receipt.message.as_deref().unwrap_or("Event updated")
                );
            }

            EventCommands::Delete { id } => {
                let receipt = api.delete_event(id).await?;
                println!(
                    "{}",
                    receipt.message.as_deref().unwrap_or("Event deleted")
                );
            }
        },

        Commands::Profile { command } => match command {
            ProfileCommands::Show => {
                let profile = api.get_profile().await?;
                if format == OutputFormat::Json {
                    println!("{}", serde_json::to_string_pretty(&profile)?);
                } else {
                    for (key, value) in profile.display_fields() {
                        println!("{:<16} {}", key, value);
                    }
                }
            }

            ProfileCommands::Update { fields, avatar } => {
                let mut form = MultipartForm::new();
                for field in fields {
                    let (key, value) = field
                        .split_once('=')
                        .with_context(|| format!("Expected key=value, got {:?}", field))?;
                    form = form.text(key.trim(), value.trim());
                }
                if let Some(path) = avatar {
                    form = form.file("avatar", read_upload(&path)?);
                }
                anyhow::ensure!(!form.is_empty(), "Nothing to update");

                let profile = api.update_profile(form).await?;
                println!("Profile updated");
                if format == OutputFormat::Json {
                    println!("{}", serde_json::to_string_pretty(&profile)?);
                }
            }
        },

        Commands::Login {
            identifier,
            password,
        } => {
            let response = api
                .login(&Credentials {
                    identifier,
                    password,
                })
                .await?;
            println!(
                "Logged in as {}{}",
                response.name.as_deref().unwrap_or("user"),
                response
                    .role
                    .as_deref()
                    .map(|r| format!(" ({})", r))
                    .unwrap_or_default()
            );
        }

        Commands::Register {
            name,
            email,
            password,
            role,
        } => {
            let receipt = api
                .register(&Registration {
                    name,
                    email,
                    password,
                    role,
                })
                .await?;
            println!(
                "{}",
                receipt.message.as_deref().unwrap_or("Account created")
            );
        }

        Commands::Logout => {
            api.logout()?;
            println!("Logged out");
        }

        Commands::Book { event_id, quantity } => {
            anyhow::ensure!(quantity > 0, "Quantity must be at least 1");
            let event = api.get_event(event_id).await?;
            let receipt = api
                .create_booking(&BookingRequest { event_id, quantity })
                .await?;

            let total = receipt
                .total_price
                .unwrap_or_else(|| tiketin::models::booking_total(event.price, quantity));
            println!(
                "Booked {} x {} - total {}",
                quantity,
                event.title,
                tiketin::format_price(total)
            );
            if let Some(code) = receipt.booking_code {
                println!("Booking code: {}", code);
            }
        }

        Commands::Bookings => {
            let path = config.api.my_bookings_path.as_deref().context(
                "No booking history endpoint configured; set api.my_bookings_path or TIKETIN_MY_BOOKINGS_PATH",
            )?;
            let bookings = api.my_bookings(path).await?;
            if format == OutputFormat::Json {
                println!("{}", serde_json::to_string_pretty(&bookings)?);
            } else if bookings.is_empty() {
                println!("No bookings yet.");
            } else {
                print_booking_table(&bookings);
            }
        }

        Commands::Notifications => {
            let prefs = NotificationPreferences::default();
            for group in ChannelGroup::ALL {
                println!("{}", group.title());
                for channel in group.channels() {
                    print_channel(&prefs, channel);
                }
                println!();
            }
            println!("Preferences are kept in the browser session only and are not sent to the server.");
        }

        Commands::Config { output } => {
            let content = generate_default_config();
            match output {
                Some(path) => {
                    std::fs::write(&path, content)
                        .with_context(|| format!("Failed to write {:?}", path))?;
                    println!("Config written to {:?}", path);
                }
                None => print!("{}", content),
            }
        }
    }

    Ok(())
}

impl EventArgs {
    fn into_draft(self) -> anyhow::Result<EventDraft> {
        let image = self.image.as_deref().map(read_upload).transpose()?;
        Ok(EventDraft {
            title: self.title,
            description: self.description,
            date: self.date,
            location: self.location,
            venue: self.venue,
            tag: self.tag,
            capacity: self.capacity,
            ticket_price: self.price,
            image,
        })
    }
}

fn read_upload(path: &Path) -> anyhow::Result<FileUpload> {
    let bytes = std::fs::read(path).with_context(|| format!("Failed to read {:?}", path))?;
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| "upload".to_string());
    Ok(FileUpload::new(file_name, None, bytes))
}

fn print_event_table(events: &[&Event]) {
    println!(
        "{:<6} {:<32} {:<24} {:<20} {:<12} {:>14}",
        "ID", "Title", "Date", "Place", "Tag", "Price"
    );
    println!("{}", "-".repeat(113));

    for event in events {
        println!(
            "{:<6} {:<32} {:<24} {:<20} {:<12} {:>14}",
            event.id,
            truncate(&event.title, 32),
            truncate(&event.display_date(), 24),
            truncate(event.place(), 20),
            truncate(&event.tag, 12),
            event.display_price()
        );
    }
}

fn print_booking_table(bookings: &[BookingSummary]) {
    println!(
        "{:<12} {:<32} {:<24} {:>4} {:>14} {:<10}",
        "Code", "Event", "Date", "Qty", "Total", "Status"
    );
    println!("{}", "-".repeat(101));

    for booking in bookings {
        println!(
            "{:<12} {:<32} {:<24} {:>4} {:>14} {:<10}",
            truncate(&booking.booking_code, 12),
            truncate(&booking.event_title, 32),
            truncate(&booking.display_event_date(), 24),
            booking.quantity,
            tiketin::format_price(booking.total_price),
            booking.status.as_deref().unwrap_or("-")
        );
    }
}

fn print_event_detail(event: &Event) {
    println!("{}", event.title);
    println!("{}", "=".repeat(event.title.chars().count().max(1)));
    println!("Date:      {}", event.display_date());
    println!("Place:     {}", event.place());
    if !event.venue.is_empty() && event.venue != event.location {
        println!("Location:  {}", event.location);
    }
    if !event.tag.is_empty() {
        println!("Tag:       {}", event.tag);
    }
    println!("Price:     {}", event.display_price());
    if let Some(capacity) = event.capacity {
        println!("Capacity:  {}", capacity);
    }
    if let Some(description) = event.description.as_deref().filter(|d| !d.is_empty()) {
        println!();
        println!("{}", description);
    }
}

fn print_channel(prefs: &NotificationPreferences, channel: Channel) {
    let state = if prefs.is_enabled(channel) { "on " } else { "off" };
    let lock = if channel.is_locked() { " (required)" } else { "" };
    println!(
        "  [{}] {:<22} {}{}",
        state,
        channel.title(),
        channel.description(),
        lock
    );
}

fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        text.to_string()
    } else {
        let kept: String = text.chars().take(width.saturating_sub(1)).collect();
        format!("{}…", kept)
    }
}
