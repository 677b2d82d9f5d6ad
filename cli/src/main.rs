mod state;
mod subscriber;

use clap::{Args, Parser, Subcommand};
use serde_json::{Map, Value};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;

use events::RelayEvent;
use state::TaskListState;
use subscriber::SubscriptionHandle;

const EVENT_BUFFER: usize = 256;

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("invalid base URL: {0}")]
    InvalidBaseUrl(String),
    #[error("http request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("websocket connect failed: {0}")]
    WsConnect(Box<tokio_tungstenite::tungstenite::Error>),
    #[error("websocket closed")]
    WsClosed,
    #[error("relay returned HTTP {status}: {message}")]
    Server { status: u16, message: String },
    #[error("invalid JSON payload: {0}")]
    InvalidJson(#[from] serde_json::Error),
    #[error("stdin read failed: {0}")]
    Stdin(#[from] std::io::Error),
}

#[derive(Parser, Debug)]
#[command(name = "relay-cli", about = "Trello relay API and real-time channel CLI")]
struct Cli {
    #[arg(long, env = "RELAY_BASE_URL", default_value = "http://127.0.0.1:5000")]
    base_url: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Clone)]
struct CliContext {
    base_url: String,
}

#[derive(Subcommand, Debug)]
enum Command {
    Ping,
    Boards(BoardsCommand),
    Tasks(TasksCommand),
    Webhooks(WebhooksCommand),
    /// Follow one list live. Type `list <id>` to switch lists.
    Watch {
        #[arg(long)]
        list_id: String,
    },
}

#[derive(Args, Debug)]
struct BoardsCommand {
    #[command(subcommand)]
    command: BoardsSubcommand,
}

#[derive(Subcommand, Debug)]
enum BoardsSubcommand {
    List,
    Create {
        #[arg(long)]
        name: String,
        #[arg(long)]
        default_lists: Option<bool>,
    },
    Delete {
        board_id: String,
    },
    Lists {
        board_id: String,
    },
}

#[derive(Args, Debug)]
struct TasksCommand {
    #[command(subcommand)]
    command: TasksSubcommand,
}

#[derive(Subcommand, Debug)]
enum TasksSubcommand {
    List {
        list_id: String,
    },
    Create {
        #[arg(long)]
        list_id: String,
        #[arg(long)]
        name: String,
        #[arg(long)]
        desc: Option<String>,
    },
    Update {
        card_id: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        desc: Option<String>,
        #[arg(long)]
        list_id: Option<String>,
    },
    /// Archives the card.
    Delete {
        card_id: String,
    },
}

#[derive(Args, Debug)]
struct WebhooksCommand {
    #[command(subcommand)]
    command: WebhooksSubcommand,
}

#[derive(Subcommand, Debug)]
enum WebhooksSubcommand {
    Create {
        #[arg(long)]
        board_id: Option<String>,
        #[arg(long)]
        callback_url: String,
    },
    List,
    Delete {
        webhook_id: String,
    },
}

#[tokio::main]
async fn main() -> Result<(), CliError> {
    let cli = Cli::parse();
    let ctx = CliContext { base_url: cli.base_url };

    match cli.command {
        Command::Ping => run_ping(&ctx).await,
        Command::Boards(boards) => run_boards(&ctx, boards).await,
        Command::Tasks(tasks) => run_tasks(&ctx, tasks).await,
        Command::Webhooks(webhooks) => run_webhooks(&ctx, webhooks).await,
        Command::Watch { list_id } => run_watch(&ctx, list_id).await,
    }
}

async fn run_ping(cli: &CliContext) -> Result<(), CliError> {
    let url = format!("{}/healthz", cli.base_url.trim_end_matches('/'));
    let response = reqwest::get(url).await?;
    let status = response.status();
    if !status.is_success() {
        return Err(CliError::Server {
            status: status.as_u16(),
            message: "health check failed".to_owned(),
        });
    }
    println!("ok");
    Ok(())
}

async fn run_boards(cli: &CliContext, boards: BoardsCommand) -> Result<(), CliError> {
    let json = match boards.command {
        BoardsSubcommand::List => api_request(cli, reqwest::Method::GET, "/api/boards", None).await?,
        BoardsSubcommand::Create { name, default_lists } => {
            let mut body = Map::new();
            body.insert("name".to_owned(), Value::String(name));
            if let Some(default_lists) = default_lists {
                body.insert("defaultLists".to_owned(), Value::Bool(default_lists));
            }
            api_request(cli, reqwest::Method::POST, "/api/boards", Some(Value::Object(body))).await?
        }
        BoardsSubcommand::Delete { board_id } => {
            let path = format!("/api/boards/{board_id}");
            api_request(cli, reqwest::Method::DELETE, &path, None).await?
        }
        BoardsSubcommand::Lists { board_id } => {
            let path = format!("/api/boards/{board_id}/lists");
            api_request(cli, reqwest::Method::GET, &path, None).await?
        }
    };
    print_json(&json)
}

async fn run_tasks(cli: &CliContext, tasks: TasksCommand) -> Result<(), CliError> {
    let json = match tasks.command {
        TasksSubcommand::List { list_id } => {
            let path = format!("/api/tasks/list/{list_id}");
            api_request(cli, reqwest::Method::GET, &path, None).await?
        }
        TasksSubcommand::Create { list_id, name, desc } => {
            let body = serde_json::json!({
                "listId": list_id,
                "name": name,
                "desc": desc.unwrap_or_default(),
            });
            api_request(cli, reqwest::Method::POST, "/api/tasks", Some(body)).await?
        }
        TasksSubcommand::Update { card_id, name, desc, list_id } => {
            let mut body = Map::new();
            if let Some(name) = name {
                body.insert("name".to_owned(), Value::String(name));
            }
            if let Some(desc) = desc {
                body.insert("desc".to_owned(), Value::String(desc));
            }
            if let Some(list_id) = list_id {
                body.insert("idList".to_owned(), Value::String(list_id));
            }
            let path = format!("/api/tasks/{card_id}");
            api_request(cli, reqwest::Method::PUT, &path, Some(Value::Object(body))).await?
        }
        TasksSubcommand::Delete { card_id } => {
            let path = format!("/api/tasks/{card_id}");
            api_request(cli, reqwest::Method::DELETE, &path, None).await?
        }
    };
    print_json(&json)
}

async fn run_webhooks(cli: &CliContext, webhooks: WebhooksCommand) -> Result<(), CliError> {
    let json = match webhooks.command {
        WebhooksSubcommand::Create { board_id, callback_url } => {
            let mut body = Map::new();
            if let Some(board_id) = board_id {
                body.insert("boardId".to_owned(), Value::String(board_id));
            }
            body.insert("callbackURL".to_owned(), Value::String(callback_url));
            api_request(cli, reqwest::Method::POST, "/api/webhooks/create", Some(Value::Object(body))).await?
        }
        WebhooksSubcommand::List => api_request(cli, reqwest::Method::GET, "/api/webhooks/list", None).await?,
        WebhooksSubcommand::Delete { webhook_id } => {
            let path = format!("/api/webhooks/{webhook_id}");
            api_request(cli, reqwest::Method::DELETE, &path, None).await?
        }
    };
    print_json(&json)
}

// =============================================================================
// WATCH
// =============================================================================

/// One active list view: its state, its subscription and the event stream
/// that subscription feeds. Dropping the view cancels the subscription.
struct ListView {
    state: TaskListState,
    events: mpsc::Receiver<RelayEvent>,
    subscription: SubscriptionHandle,
}

async fn run_watch(cli: &CliContext, list_id: String) -> Result<(), CliError> {
    let ws_url = subscriber::ws_url(&cli.base_url)?;
    let mut view = open_view(cli, &ws_url, list_id).await?;
    print_list(&view.state);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        tokio::select! {
            event = view.events.recv() => {
                let Some(event) = event else {
                    return Err(CliError::WsClosed);
                };
                if view.state.apply(&event) {
                    print_list(&view.state);
                }
            }
            line = lines.next_line() => {
                let Some(line) = line? else {
                    break;
                };
                match parse_list_command(&line) {
                    Some(next) => {
                        view.subscription.cancel();
                        view = open_view(cli, &ws_url, next.to_owned()).await?;
                        print_list(&view.state);
                    }
                    None if line.trim().is_empty() => {}
                    None => eprintln!("unknown command; use `list <id>`"),
                }
            }
        }
    }

    view.subscription.cancel();
    Ok(())
}

async fn open_view(cli: &CliContext, ws_url: &str, list_id: String) -> Result<ListView, CliError> {
    let path = format!("/api/tasks/list/{list_id}");
    let cards = api_request(cli, reqwest::Method::GET, &path, None).await?;
    let state = TaskListState::from_response(list_id, cards);

    let (tx, events) = mpsc::channel(EVENT_BUFFER);
    let subscription = subscriber::subscribe(ws_url, tx).await?;
    Ok(ListView { state, events, subscription })
}

fn parse_list_command(line: &str) -> Option<&str> {
    let mut parts = line.split_whitespace();
    match (parts.next(), parts.next(), parts.next()) {
        (Some("list"), Some(id), None) => Some(id),
        _ => None,
    }
}

fn print_list(state: &TaskListState) {
    println!("-- list {} ({} cards)", state.list_id, state.cards.len());
    for card in &state.cards {
        let id = card.get("id").and_then(Value::as_str).unwrap_or("?");
        let name = card.get("name").and_then(Value::as_str).unwrap_or("");
        println!("{id}\t{name}");
    }
}

// =============================================================================
// HTTP
// =============================================================================

async fn api_request(
    cli: &CliContext,
    method: reqwest::Method,
    path: &str,
    body: Option<Value>,
) -> Result<Value, CliError> {
    let client = reqwest::Client::new();
    let url = format!("{}{}", cli.base_url.trim_end_matches('/'), path);

    let request = client.request(method, &url);
    let request = if let Some(json) = body { request.json(&json) } else { request };

    let response = request.send().await?;
    let status = response.status();
    let value = response.json::<Value>().await.unwrap_or(Value::Null);

    if !status.is_success() {
        return Err(CliError::Server {
            status: status.as_u16(),
            message: value.to_string(),
        });
    }

    Ok(value)
}

fn print_json(value: &Value) -> Result<(), CliError> {
    let rendered = serde_json::to_string_pretty(value)?;
    println!("{rendered}");
    Ok(())
}
