use std::fmt;

use hoctap_core::catalog::{ContinueLesson, continue_lessons};
use hoctap_core::model::{ChapterId, ClassId, LoginDraft, RegisterDraft, SubjectId};
use services::{
    ApiConfig, AppConfig, AppServices, ChapterListState, ChapterPhase, EMPTY_SUBJECTS_MESSAGE,
    LessonSlot, SessionContext, SubjectDetail,
};
use storage::repository::Storage;
use tracing::debug;
use tracing_subscriber::EnvFilter;

/// Started lessons shown on the home summary.
const HOME_CONTINUE_LIMIT: usize = 2;

#[derive(Debug)]
enum ArgsError {
    MissingValue { flag: &'static str },
    MissingFlag { command: &'static str, flag: &'static str },
    UnknownArg(String),
    UnknownCommand(String),
    InvalidId { flag: &'static str, raw: String },
    InvalidDbUrl { raw: String },
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::MissingFlag { command, flag } => write!(f, "{command} requires {flag}"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::UnknownCommand(cmd) => write!(f, "unknown subcommand: {cmd}"),
            ArgsError::InvalidId { flag, raw } => write!(f, "invalid {flag} value: {raw:?}"),
            ArgsError::InvalidDbUrl { raw } => write!(f, "invalid --db value: {raw}"),
        }
    }
}

impl std::error::Error for ArgsError {}

fn require_value(
    args: &mut impl Iterator<Item = String>,
    flag: &'static str,
) -> Result<String, ArgsError> {
    args.next().ok_or(ArgsError::MissingValue { flag })
}

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  cargo run -p app -- <command> [--db <sqlite_url>] [--api <base_url>]");
    eprintln!();
    eprintln!("Commands:");
    eprintln!("  login    --email <email> --password <password>");
    eprintln!("  register --name <full name> --email <email> --password <password> [--confirm <password>]");
    eprintln!("  logout");
    eprintln!("  classes");
    eprintln!("  subjects [--class <id>]");
    eprintln!("  chapters --subject <id> [--expand <chapter id>]...");
    eprintln!("  home");
    eprintln!();
    eprintln!("Defaults:");
    eprintln!("  --db sqlite://hoctap.sqlite3");
    eprintln!("  --api http://192.168.0.45:4000");
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  HOCTAP_DB_URL, HOCTAP_API_BASE_URL, HOCTAP_STATIC_FALLBACK, HOCTAP_OFFLINE, RUST_LOG");
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Command {
    Login {
        email: String,
        password: String,
    },
    Register {
        full_name: String,
        email: String,
        password: String,
        confirmation: Option<String>,
    },
    Logout,
    Classes,
    Subjects {
        class_id: Option<ClassId>,
    },
    Chapters {
        subject_id: SubjectId,
        expand: Vec<ChapterId>,
    },
    Home,
}

#[derive(Default)]
struct Flags {
    email: Option<String>,
    password: Option<String>,
    name: Option<String>,
    confirm: Option<String>,
    class_id: Option<ClassId>,
    subject_id: Option<SubjectId>,
    expand: Vec<ChapterId>,
}

#[derive(Debug)]
struct Args {
    db_url: Option<String>,
    api_url: Option<String>,
    command: Command,
}

fn parse_id<T: std::str::FromStr>(raw: String, flag: &'static str) -> Result<T, ArgsError> {
    raw.parse().map_err(|_| ArgsError::InvalidId { flag, raw })
}

impl Args {
    fn parse(mut args: impl Iterator<Item = String>) -> Result<Option<Self>, ArgsError> {
        let name = match args.next() {
            None => return Ok(None),
            Some(first) if matches!(first.as_str(), "--help" | "-h") => return Ok(None),
            Some(first) => first,
        };

        let mut db_url = None;
        let mut api_url = None;
        let mut flags = Flags::default();
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--db" => {
                    let value = require_value(&mut args, "--db")?;
                    if value.trim().is_empty() {
                        return Err(ArgsError::InvalidDbUrl { raw: value });
                    }
                    db_url = Some(value);
                }
                "--api" => api_url = Some(require_value(&mut args, "--api")?),
                "--email" => flags.email = Some(require_value(&mut args, "--email")?),
                "--password" => flags.password = Some(require_value(&mut args, "--password")?),
                "--name" => flags.name = Some(require_value(&mut args, "--name")?),
                "--confirm" => flags.confirm = Some(require_value(&mut args, "--confirm")?),
                "--class" => {
                    let value = require_value(&mut args, "--class")?;
                    flags.class_id = Some(parse_id(value, "--class")?);
                }
                "--subject" => {
                    let value = require_value(&mut args, "--subject")?;
                    flags.subject_id = Some(parse_id(value, "--subject")?);
                }
                "--expand" => {
                    let value = require_value(&mut args, "--expand")?;
                    flags.expand.push(parse_id(value, "--expand")?);
                }
                "--help" | "-h" => return Ok(None),
                _ => return Err(ArgsError::UnknownArg(arg)),
            }
        }

        let command = Command::from_flags(&name, flags)?;
        Ok(Some(Self {
            db_url,
            api_url,
            command,
        }))
    }
}

fn missing(command: &'static str, flag: &'static str) -> ArgsError {
    ArgsError::MissingFlag { command, flag }
}

impl Command {
    fn from_flags(name: &str, flags: Flags) -> Result<Self, ArgsError> {
        match name {
            "login" => Ok(Self::Login {
                email: flags.email.ok_or(missing("login", "--email"))?,
                password: flags.password.ok_or(missing("login", "--password"))?,
            }),
            "register" => Ok(Self::Register {
                full_name: flags.name.ok_or(missing("register", "--name"))?,
                email: flags.email.ok_or(missing("register", "--email"))?,
                password: flags.password.ok_or(missing("register", "--password"))?,
                confirmation: flags.confirm,
            }),
            "logout" => Ok(Self::Logout),
            "classes" => Ok(Self::Classes),
            "subjects" => Ok(Self::Subjects {
                class_id: flags.class_id,
            }),
            "chapters" => Ok(Self::Chapters {
                subject_id: flags.subject_id.ok_or(missing("chapters", "--subject"))?,
                expand: flags.expand,
            }),
            "home" => Ok(Self::Home),
            other => Err(ArgsError::UnknownCommand(other.to_owned())),
        }
    }
}

fn normalize_sqlite_url(raw: String) -> String {
    if raw == "sqlite::memory:" || raw.starts_with("sqlite://") {
        return raw;
    }

    let trimmed = raw.trim().to_string();
    let path_str = trimmed
        .strip_prefix("sqlite:")
        .unwrap_or(trimmed.as_str())
        .to_string();
    let path = std::path::Path::new(&path_str);
    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()
            .unwrap_or_else(|_| std::path::PathBuf::from("."))
            .join(path)
    };
    format!("sqlite://{}", absolute.display())
}

fn prepare_sqlite_file(db_url: &str) -> Result<(), Box<dyn std::error::Error>> {
    if db_url == "sqlite::memory:" {
        return Ok(());
    }

    let path = db_url
        .strip_prefix("sqlite://")
        .ok_or_else(|| ArgsError::InvalidDbUrl {
            raw: db_url.to_string(),
        })?;
    let path = path.split('?').next().unwrap_or(path);
    if path.is_empty() {
        return Err(ArgsError::InvalidDbUrl {
            raw: db_url.to_string(),
        }
        .into());
    }

    let path = std::path::Path::new(path);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    if !path.exists() {
        std::fs::OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(false)
            .open(path)?;
    }

    Ok(())
}

/// Open + migrate SQLite at startup; only the access token lives there.
async fn open_services(config: &AppConfig) -> Result<AppServices, Box<dyn std::error::Error>> {
    prepare_sqlite_file(&config.db_url)?;
    let storage = Storage::sqlite(&config.db_url).await?;
    Ok(AppServices::from_storage(&storage, config))
}

fn home_lessons() -> Vec<ContinueLesson> {
    continue_lessons(HOME_CONTINUE_LIMIT)
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn print_detail(detail: &SubjectDetail) {
    let header = detail.header();
    println!(
        "{} ({}) {}% · {}",
        header.name, header.grade, header.progress_percent, header.total_units_text
    );
    for chapter in detail.chapters() {
        let phase = detail.phase(&chapter.id);
        let marker = if phase == ChapterPhase::Collapsed { '▸' } else { '▾' };
        println!(
            "{marker} [{}] {}  {}",
            chapter.id,
            chapter.title,
            chapter.progress_label()
        );
        if phase == ChapterPhase::Collapsed {
            continue;
        }
        match detail.lesson_slot(&chapter.id) {
            LessonSlot::Loaded(lessons) if lessons.is_empty() => {
                println!("    (chưa có bài học)");
            }
            LessonSlot::Loaded(lessons) => {
                for lesson in lessons {
                    println!(
                        "    {:<12} {}  {}  {}%",
                        lesson.status.as_str(),
                        lesson.title,
                        lesson.duration,
                        lesson.percent()
                    );
                }
            }
            LessonSlot::Failed(message) => println!("    ! {message}"),
            LessonSlot::NotLoaded | LessonSlot::Loading => println!("    …"),
        }
    }
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let parsed = match Args::parse(std::env::args().skip(1)) {
        Ok(Some(parsed)) => parsed,
        Ok(None) => {
            print_usage();
            return Ok(());
        }
        Err(err) => {
            eprintln!("{err}");
            print_usage();
            return Err(err.into());
        }
    };

    let mut config = AppConfig::from_env()?;
    config.db_url = normalize_sqlite_url(parsed.db_url.unwrap_or(config.db_url));
    if let Some(api_url) = parsed.api_url {
        config.api = ApiConfig::new(&api_url)?;
    }
    debug!(db = %config.db_url, api = %config.api.base_url(), "configuration resolved");

    let app = open_services(&config).await?;

    match parsed.command {
        Command::Login { email, password } => {
            let session = app.auth().login(LoginDraft::new(email, password)).await?;
            match session.user {
                Some(user) => {
                    println!("Đăng nhập thành công: {} <{}>", user.full_name, user.email);
                }
                None => println!("Đăng nhập thành công."),
            }
        }
        Command::Register {
            full_name,
            email,
            password,
            confirmation,
        } => {
            let draft = RegisterDraft {
                full_name,
                email,
                password,
                password_confirmation: confirmation,
            };
            let session = app.auth().register(draft).await?;
            if session.access_token.is_some() {
                println!("Đăng ký thành công, đã đăng nhập.");
            } else {
                println!("Đăng ký thành công. Vui lòng đăng nhập.");
            }
        }
        Command::Logout => {
            app.auth().logout().await?;
            println!("Đã đăng xuất.");
        }
        Command::Classes => {
            let mut session = SessionContext::new();
            session.set_classes(app.catalog().load_classes().await?);
            let current = session.current_class().map(|class| class.id.clone());
            for class in session.classes() {
                let marker = if Some(&class.id) == current.as_ref() { '*' } else { ' ' };
                println!("{marker} [{}] {}", class.id, class.display_name());
            }
        }
        Command::Subjects { class_id } => {
            let catalog = app.catalog();
            let mut session = SessionContext::new();
            session.set_classes(catalog.load_classes().await?);
            if let Some(class_id) = class_id.as_ref() {
                if session.select_class(class_id).is_none() {
                    return Err(format!("unknown class: {class_id}").into());
                }
            }
            let Some(class) = session.current_class() else {
                return Ok(());
            };
            println!("{}", class.display_name());
            let subjects = catalog.load_subjects(&class.id).await?;
            if subjects.is_empty() {
                println!("{EMPTY_SUBJECTS_MESSAGE}");
            }
            for subject in &subjects {
                println!(
                    "  [{}] {}  {}  {}",
                    subject.id, subject.name, subject.progress_text, subject.description
                );
            }
        }
        Command::Chapters { subject_id, expand } => {
            let mut detail = app.catalog().open_subject(None, Some(&subject_id))?;
            detail.load_chapters().await;
            if let ChapterListState::Failed(message) = detail.chapter_state() {
                println!("{message}");
                return Ok(());
            }
            for chapter_id in &expand {
                detail.toggle_chapter(chapter_id).await;
            }
            print_detail(&detail);
        }
        Command::Home => {
            let signed_in = app.auth().is_signed_in().await?;
            println!(
                "{}",
                if signed_in { "Đã đăng nhập" } else { "Chưa đăng nhập" }
            );
            println!("Tiếp tục học:");
            for item in home_lessons() {
                println!(
                    "  {} · {}  {}%",
                    item.subject_name,
                    item.lesson.title,
                    item.percent()
                );
            }
        }
    }

    Ok(())
}

#[tokio::main]
async fn main() {
    init_tracing();
    if let Err(err) = run().await {
        // At this layer (binary glue), printing once is fine.
        eprintln!("{err}");
        std::process::exit(2);
    }
}
