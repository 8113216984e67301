//! Command-line front end.

use std::ffi::OsString;
use std::io::{BufRead, Write};
use std::sync::Arc;

use clap::{Arg, ArgAction, ArgMatches, Command};
use gridview::render::render_page;
use gridview::{ConfirmStatus, NoticeKind, SortDirection, Toast, ToastQueue};

use crate::api::{AdminClient, Resource, RestResource};
use crate::config::AdminConfig;
use crate::error::Error;
use crate::model::{Banner, Coupon, FlashSale, Order, Product, ResourceKind, Seller};
use crate::navigation::RouteLog;
use crate::screens::{ListScreen, Listing, PendingConfirm};

const PROGRAM_NAME: &str = "storefront-admin";

/// Options of the `list` subcommand.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListArgs {
    pub search: Option<String>,
    /// `(name, expression)` pairs from `--filter NAME=VALUE`.
    pub filters: Vec<(String, String)>,
    pub sort: Option<String>,
    pub desc: bool,
    /// One-based page number.
    pub page: usize,
    pub page_size: Option<usize>,
}

/// A parsed command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Invocation {
    List {
        resource: ResourceKind,
        args: ListArgs,
    },
    Delete {
        resource: ResourceKind,
        id: String,
        yes: bool,
    },
    Toggle {
        resource: ResourceKind,
        id: String,
        yes: bool,
    },
}

impl Invocation {
    pub fn resource(&self) -> ResourceKind {
        match self {
            Self::List { resource, .. }
            | Self::Delete { resource, .. }
            | Self::Toggle { resource, .. } => *resource,
        }
    }
}

pub fn command() -> Command {
    let resources = ResourceKind::ALL.map(ResourceKind::path).join(", ");
    Command::new(PROGRAM_NAME)
        .version(env!("CARGO_PKG_VERSION"))
        .arg_required_else_help(true)
        .about(format!(
            "Storefront admin lists\n\nResources: {}\n\nExample:\n {} list \
             products --filter price=10..50 --sort price --desc",
            resources, PROGRAM_NAME
        ))
        .subcommand(list_subcommand())
        .subcommand(delete_subcommand())
        .subcommand(toggle_subcommand())
}

fn resource_arg() -> Arg {
    Arg::new("resource")
        .index(1)
        .required(true)
        .help("Collection to work on, e.g. banners")
}

fn list_subcommand() -> Command {
    Command::new("list")
        .about("Print one page of a collection")
        .arg(resource_arg())
        .arg(
            Arg::new("search")
                .long("search")
                .short('s')
                .help("Free-text search over searchable columns"),
        )
        .arg(
            Arg::new("filter")
                .long("filter")
                .short('f')
                .action(ArgAction::Append)
                .help(
                    "NAME=VALUE filter; repeatable. VALUE may be 'a|b', \
                     '10..50', '~text', '!' (empty) or '*' (not empty)",
                ),
        )
        .arg(
            Arg::new("sort")
                .long("sort")
                .help("Column id to sort by"),
        )
        .arg(
            Arg::new("desc")
                .long("desc")
                .action(ArgAction::SetTrue)
                .help("Sort descending"),
        )
        .arg(
            Arg::new("page")
                .long("page")
                .short('p')
                .default_value("1")
                .help("Page number, starting at 1"),
        )
        .arg(
            Arg::new("page_size")
                .long("page-size")
                .help("Rows per page"),
        )
}

fn delete_subcommand() -> Command {
    Command::new("delete")
        .about("Delete a record after confirmation")
        .arg(resource_arg())
        .arg(Arg::new("id").index(2).required(true).help("Record id"))
        .arg(yes_arg())
}

fn toggle_subcommand() -> Command {
    Command::new("toggle")
        .about("Switch a record's active flag")
        .arg(resource_arg())
        .arg(Arg::new("id").index(2).required(true).help("Record id"))
        .arg(yes_arg())
}

fn yes_arg() -> Arg {
    Arg::new("yes")
        .long("yes")
        .short('y')
        .action(ArgAction::SetTrue)
        .help("Skip the confirmation prompt")
}

/// Parses a full command line, program name included.
pub fn parse_from<I, T>(args: I) -> Result<Invocation, Error>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let matches = command().try_get_matches_from(args)?;
    match matches.subcommand() {
        Some(("list", m)) => Ok(Invocation::List {
            resource: resource(m)?,
            args: list_args(m)?,
        }),
        Some(("delete", m)) => Ok(Invocation::Delete {
            resource: resource(m)?,
            id: required(m, "id")?,
            yes: m.get_flag("yes"),
        }),
        Some(("toggle", m)) => Ok(Invocation::Toggle {
            resource: resource(m)?,
            id: required(m, "id")?,
            yes: m.get_flag("yes"),
        }),
        _ => Err(Error::usage("expected one of: list, delete, toggle")),
    }
}

fn required(m: &ArgMatches, name: &str) -> Result<String, Error> {
    m.get_one::<String>(name)
        .cloned()
        .ok_or_else(|| Error::usage(format!("missing <{name}>")))
}

fn resource(m: &ArgMatches) -> Result<ResourceKind, Error> {
    required(m, "resource")?.parse()
}

fn number(m: &ArgMatches, name: &str) -> Result<Option<usize>, Error> {
    m.get_one::<String>(name)
        .map(|raw| {
            raw.parse::<usize>()
                .ok()
                .filter(|&n| n > 0)
                .ok_or_else(|| {
                    Error::usage(format!("--{name} expects a positive number, got '{raw}'"))
                })
        })
        .transpose()
}

fn list_args(m: &ArgMatches) -> Result<ListArgs, Error> {
    let filters = m
        .get_many::<String>("filter")
        .into_iter()
        .flatten()
        .map(|raw| {
            raw.split_once('=')
                .map(|(name, value)| (name.trim().to_string(), value.to_string()))
                .filter(|(name, _)| !name.is_empty())
                .ok_or_else(|| Error::usage(format!("--filter expects NAME=VALUE, got '{raw}'")))
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(ListArgs {
        search: m.get_one::<String>("search").cloned(),
        filters,
        sort: m.get_one::<String>("sort").cloned(),
        desc: m.get_flag("desc"),
        page: number(m, "page")?.unwrap_or(1),
        page_size: number(m, "page_size")?,
    })
}

/// Runs an invocation against the REST backend described by `config`.
pub async fn dispatch(
    invocation: &Invocation,
    config: &AdminConfig,
    input: &mut dyn BufRead,
    output: &mut dyn Write,
) -> Result<(), Error> {
    let client = config.client()?;
    let client = &client;
    match invocation.resource() {
        ResourceKind::Banners => {
            run_rest::<Banner>(invocation, config, client, input, output).await
        }
        ResourceKind::Coupons => {
            run_rest::<Coupon>(invocation, config, client, input, output).await
        }
        ResourceKind::FlashSales => {
            run_rest::<FlashSale>(invocation, config, client, input, output).await
        }
        ResourceKind::Products => {
            run_rest::<Product>(invocation, config, client, input, output).await
        }
        ResourceKind::Orders => run_rest::<Order>(invocation, config, client, input, output).await,
        ResourceKind::Sellers => {
            run_rest::<Seller>(invocation, config, client, input, output).await
        }
    }
}

async fn run_rest<T: Listing>(
    invocation: &Invocation,
    config: &AdminConfig,
    client: &AdminClient,
    input: &mut dyn BufRead,
    output: &mut dyn Write,
) -> Result<(), Error> {
    let toasts = ToastQueue::new();
    let resource: Arc<dyn Resource<T>> = Arc::new(RestResource::<T>::new(client.clone()));
    let screen = ListScreen::new(
        resource,
        Arc::new(toasts.clone()),
        Arc::new(RouteLog::new()),
    )?
    .with_page_size(config.page_size(T::KIND, T::default_page_size()))?;
    screen.table().set_search_mode(config.search_mode);
    run(invocation, &screen, &toasts, input, output).await
}

/// Runs an invocation on a screen whose notifier is `toasts`, then prints
/// the collected notifications.
pub async fn run<T: Listing>(
    invocation: &Invocation,
    screen: &ListScreen<T>,
    toasts: &ToastQueue,
    input: &mut dyn BufRead,
    output: &mut dyn Write,
) -> Result<(), Error> {
    let result = execute(invocation, screen, input, output).await;
    for toast in toasts.drain() {
        writeln!(output, "{}", toast_line(&toast))?;
    }
    result
}

async fn execute<T: Listing>(
    invocation: &Invocation,
    screen: &ListScreen<T>,
    input: &mut dyn BufRead,
    output: &mut dyn Write,
) -> Result<(), Error> {
    screen.refresh().await?;
    match invocation {
        Invocation::List { args, .. } => {
            let table = screen.table();
            if let Some(size) = args.page_size {
                table.set_page_size(size)?;
            }
            if let Some(search) = &args.search {
                table.set_search(search.as_str());
            }
            for (name, value) in &args.filters {
                screen.apply_filter(name, value)?;
            }
            if let Some(column) = &args.sort {
                let direction = if args.desc {
                    SortDirection::Desc
                } else {
                    SortDirection::Asc
                };
                table.sort_by(column, direction)?;
            }
            table.set_page(args.page.saturating_sub(1));
            writeln!(output, "{}", render_page(table))?;
            Ok(())
        }
        Invocation::Delete { id, yes, .. } => {
            let pending = screen.request_delete(id).ok_or_else(|| unknown_row::<T>(id))?;
            confirm(screen, &pending, *yes, input, output).await
        }
        Invocation::Toggle { id, yes, .. } => {
            if screen.table().find_row(id).is_none() {
                return Err(unknown_row::<T>(id));
            }
            match screen.request_toggle(id) {
                Some(pending) => confirm(screen, &pending, *yes, input, output).await,
                None => {
                    screen.toggle(id).await?;
                    Ok(())
                }
            }
        }
    }
}

async fn confirm<T: Listing>(
    screen: &ListScreen<T>,
    pending: &PendingConfirm,
    yes: bool,
    input: &mut dyn BufRead,
    output: &mut dyn Write,
) -> Result<(), Error> {
    let modal = pending.modal();
    writeln!(output, "{}", modal.title())?;
    writeln!(output, "{}", modal.message())?;

    if !yes && !ask(input, output)? {
        pending.cancel();
        writeln!(output, "Cancelled")?;
        return Ok(());
    }

    match screen.confirm(pending).await {
        ConfirmStatus::Failed(message) => Err(Error::Action(message)),
        ConfirmStatus::Confirmed | ConfirmStatus::Ignored => Ok(()),
    }
}

fn ask(input: &mut dyn BufRead, output: &mut dyn Write) -> Result<bool, Error> {
    write!(output, "Proceed? [y/N] ")?;
    output.flush()?;
    let mut answer = String::new();
    input.read_line(&mut answer)?;
    Ok(matches!(answer.trim().to_lowercase().as_str(), "y" | "yes"))
}

fn unknown_row<T: Listing>(id: &str) -> Error {
    Error::usage(format!("no {} with id '{}'", T::KIND.singular(), id))
}

fn toast_line(toast: &Toast) -> String {
    match toast.kind {
        NoticeKind::Info => toast.message.clone(),
        NoticeKind::Success => format!("ok: {}", toast.message),
        NoticeKind::Warning => format!("warning: {}", toast.message),
        NoticeKind::Error => format!("error: {}", toast.message),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<Invocation, Error> {
        parse_from(std::iter::once(PROGRAM_NAME).chain(args.iter().copied()))
    }

    #[test]
    fn test_parse_list() {
        let invocation = parse(&[
            "list",
            "flash-sales",
            "--search",
            "shoe",
            "--filter",
            "price=10..50",
            "-f",
            "status=active",
            "--sort",
            "price",
            "--desc",
            "--page",
            "2",
        ])
        .unwrap();
        assert_eq!(
            invocation,
            Invocation::List {
                resource: ResourceKind::FlashSales,
                args: ListArgs {
                    search: Some("shoe".into()),
                    filters: vec![
                        ("price".into(), "10..50".into()),
                        ("status".into(), "active".into()),
                    ],
                    sort: Some("price".into()),
                    desc: true,
                    page: 2,
                    page_size: None,
                },
            }
        );
    }

    #[test]
    fn test_parse_delete_and_toggle() {
        assert_eq!(
            parse(&["delete", "banners", "b1", "--yes"]).unwrap(),
            Invocation::Delete {
                resource: ResourceKind::Banners,
                id: "b1".into(),
                yes: true,
            }
        );
        assert_eq!(
            parse(&["toggle", "seller", "s9"]).unwrap().resource(),
            ResourceKind::Sellers
        );
    }

    #[test]
    fn test_parse_errors() {
        assert!(matches!(parse(&["list", "customers"]), Err(Error::Usage(_))));
        assert!(matches!(
            parse(&["list", "products", "--filter", "price"]),
            Err(Error::Usage(_))
        ));
        assert!(matches!(
            parse(&["list", "products", "--page", "0"]),
            Err(Error::Usage(_))
        ));
        assert!(matches!(parse(&["delete", "products"]), Err(Error::Cli(_))));
    }

    #[test]
    fn test_toast_line() {
        assert_eq!(toast_line(&Toast::success("Saved")), "ok: Saved");
        assert_eq!(toast_line(&Toast::error("Nope")), "error: Nope");
    }
}
