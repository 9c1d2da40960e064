//! [`Args`] definitions.

use std::{fmt, str::FromStr};

use clap::{Parser, Subcommand};
use common::{money::Currency, pagination::Arguments, Date, DateTime};
use rust_decimal::Decimal;
use service::domain::{
    contract, distributor, lead, order, partner, product, product_type,
    product::{duration, tier},
    user::{Password, Username},
};

use crate::{config, Error};

/// Console of the partner relationship management system.
#[derive(Debug, Parser)]
#[command(name = "prm", version, about, long_about = None)]
pub struct Args {
    /// Path to the configuration file.
    #[arg(short, long, default_value = "prm.toml")]
    pub config: String,

    /// Operation to perform.
    #[command(subcommand)]
    pub command: Command,
}

impl Args {
    /// Parses command line arguments.
    ///
    /// # Errors
    ///
    /// Errors if failed to parse command line arguments.
    pub fn parse() -> Result<Self, clap::Error> {
        <Self as Parser>::try_parse()
    }
}

/// Operation performed by the console.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Logs in and stores the session for the following calls.
    Login {
        /// Name of the user to log in as.
        #[arg(short, long)]
        username: Username,

        /// Password of the user.
        #[arg(long, env = "PRM_PASSWORD", hide_env_values = true)]
        password: Password,
    },

    /// Forgets the stored session.
    Logout,

    /// Manages products.
    #[command(subcommand)]
    Products(Products),

    /// Works with price tiers locally.
    #[command(subcommand)]
    Tiers(Tiers),

    /// Lists product types.
    #[command(subcommand)]
    ProductTypes(ProductTypes),

    /// Manages contracts.
    #[command(subcommand)]
    Contracts(Contracts),

    /// Manages orders.
    #[command(subcommand)]
    Orders(Orders),

    /// Manages partners.
    #[command(subcommand)]
    Partners(Companies<partner::Id>),

    /// Manages distributors.
    #[command(subcommand)]
    Distributors(Distributors),

    /// Manages leads.
    #[command(subcommand)]
    Leads(Leads),
}

/// Operation upon products.
#[derive(Debug, Subcommand)]
pub enum Products {
    /// Lists products.
    List {
        /// Pagination of the list.
        #[command(flatten)]
        page: Page,

        /// List inactive products instead of active ones.
        #[arg(long)]
        inactive: bool,

        /// Name of the product type to list products of.
        #[arg(long = "type")]
        product_type: Option<String>,
    },

    /// Shows a product.
    Get {
        /// ID of the product.
        id: product::Id,
    },

    /// Creates a product along with its price tiers.
    Create {
        /// Name of the product.
        #[arg(long)]
        name: product::Name,

        /// ID of the product type.
        #[arg(long = "type-id")]
        type_id: product_type::Id,

        /// Unit the product is sold in.
        #[arg(long)]
        unit: product::Unit,

        /// Description of the product.
        #[arg(long)]
        description: Option<String>,

        /// Create the product inactive.
        #[arg(long)]
        inactive: bool,

        /// Price tier as `MIN..[MAX]@PRICE[/month|/year]`.
        #[arg(long = "tier")]
        tiers: Vec<TierArg>,
    },

    /// Updates a product and adds new price tiers to it.
    Update {
        /// ID of the product.
        id: product::Id,

        /// New name of the product.
        #[arg(long)]
        name: Option<product::Name>,

        /// New unit of the product.
        #[arg(long)]
        unit: Option<product::Unit>,

        /// New description of the product.
        #[arg(long)]
        description: Option<String>,

        /// New activity of the product.
        #[arg(long)]
        active: Option<bool>,

        /// Price tier to add as `MIN..[MAX]@PRICE[/month|/year]`.
        #[arg(long = "tier")]
        tiers: Vec<TierArg>,
    },

    /// Deletes a product.
    Delete {
        /// ID of the product.
        id: product::Id,
    },

    /// Prices some quantity of a product.
    Price {
        /// ID of the product.
        id: product::Id,

        /// Quantity to price.
        quantity: u32,

        /// ID of the duration to commit for.
        #[arg(long)]
        duration: Option<duration::Id>,
    },

    /// Lists available durations.
    Durations,
}

/// Local operation upon price tiers.
#[derive(Debug, Subcommand)]
pub enum Tiers {
    /// Checks the provided price tiers as if they were added one by one.
    Check {
        /// Price tier as `MIN..[MAX]@PRICE[/month|/year]`.
        #[arg(required = true)]
        tiers: Vec<TierArg>,
    },
}

/// Operation upon product types.
#[derive(Debug, Subcommand)]
pub enum ProductTypes {
    /// Lists product types.
    List {
        /// Pagination of the list.
        #[command(flatten)]
        page: Page,

        /// Text to search in names.
        #[arg(long)]
        search: Option<String>,
    },

    /// Creates a product type.
    Create {
        /// Name of the product type.
        #[arg(long)]
        name: String,

        /// Description of the product type.
        #[arg(long)]
        description: Option<String>,
    },
}

/// Operation upon contracts.
#[derive(Debug, Subcommand)]
pub enum Contracts {
    /// Lists contracts.
    List {
        /// Pagination of the list.
        #[command(flatten)]
        page: Page,

        /// Status to list contracts in.
        #[arg(long)]
        status: Option<contract::Status>,
    },

    /// Shows a contract.
    Get {
        /// ID of the contract.
        id: contract::Id,
    },

    /// Estimates the total value of a contract.
    Estimate {
        /// Value billed every period.
        #[arg(long)]
        value: Option<Decimal>,

        /// Number of months between billings.
        #[arg(long, allow_negative_numbers = true)]
        periodicity: Option<i32>,

        /// Activation date as `YYYY-MM-DD`.
        #[arg(long)]
        from: Option<Date>,

        /// Expiration date as `YYYY-MM-DD`.
        #[arg(long)]
        to: Option<Date>,
    },

    /// Changes the status of a contract.
    Status {
        /// ID of the contract.
        id: contract::Id,

        /// Status to change to.
        status: contract::Status,

        /// Reason of the change.
        #[arg(long)]
        reason: Option<String>,
    },

    /// Attaches a note to a contract.
    Note {
        /// ID of the contract.
        id: contract::Id,

        /// Note to attach.
        #[command(flatten)]
        note: Note,
    },

    /// Lists invoices billed for a contract.
    Invoices {
        /// ID of the contract.
        id: contract::Id,
    },

    /// Activates a fulfilled order into a contract.
    Activate {
        /// ID of the fulfilled order.
        order: order::Id,

        /// Activation date and time, now if omitted.
        #[arg(long, value_parser = datetime)]
        activation: Option<DateTime>,

        /// Expiration date and time.
        #[arg(long, value_parser = datetime)]
        expiration: Option<DateTime>,

        /// Internal notes of the contract.
        #[arg(long)]
        notes: Option<String>,
    },
}

/// Operation upon orders.
#[derive(Debug, Subcommand)]
pub enum Orders {
    /// Lists orders.
    List {
        /// Pagination of the list.
        #[command(flatten)]
        page: Page,

        /// Status to list orders in.
        #[arg(long)]
        status: Option<order::Status>,
    },

    /// Shows an order.
    Get {
        /// ID of the order.
        id: order::Id,
    },

    /// Places an order.
    Create {
        /// ID of the partner to place the order for.
        #[arg(long)]
        partner: Option<partner::Id>,

        /// ID of the distributor to place the order through.
        #[arg(long)]
        distributor: Option<distributor::Id>,

        /// ID of the lead the order originates from.
        #[arg(long)]
        lead: Option<lead::Id>,

        /// Internal notes of the order.
        #[arg(long)]
        notes: Option<String>,

        /// Ordered line as `PRODUCT_ID:DURATION_ID:QUANTITY`.
        #[arg(long = "item", required = true)]
        items: Vec<ItemArg>,
    },

    /// Changes the status of an order.
    Status {
        /// ID of the order.
        id: order::Id,

        /// Status to change to.
        status: order::Status,

        /// Reason of the change.
        #[arg(long)]
        reason: Option<String>,
    },

    /// Attaches a note to an order.
    Note {
        /// ID of the order.
        id: order::Id,

        /// Note to attach.
        #[command(flatten)]
        note: Note,
    },
}

/// Note attached to a contract, an order or a lead.
#[derive(clap::Args, Debug)]
pub struct Note {
    /// Text of the note.
    pub content: String,

    /// Hide the note from customers.
    #[arg(long)]
    pub internal: bool,

    /// Pin the note on top.
    #[arg(long)]
    pub pinned: bool,
}

/// Operation upon distributors.
#[derive(Debug, Subcommand)]
pub enum Distributors {
    /// Operation upon distributors as companies.
    #[command(flatten)]
    Company(Companies<distributor::Id>),

    /// Assigns a partner to a distributor.
    Assign {
        /// ID of the distributor.
        id: distributor::Id,

        /// ID of the partner to assign.
        partner: partner::Id,

        /// Notes about the assignment.
        #[arg(long)]
        notes: Option<String>,
    },

    /// Lists partners assigned to a distributor.
    Partners {
        /// ID of the distributor.
        id: distributor::Id,
    },
}

/// Operation upon partners or distributors.
#[derive(Debug, Subcommand)]
pub enum Companies<Id: CompanyId> {
    /// Lists companies.
    List {
        /// Pagination of the list.
        #[command(flatten)]
        page: Page,

        /// List inactive companies instead of active ones.
        #[arg(long)]
        inactive: bool,

        /// Text to search in names.
        #[arg(long)]
        search: Option<String>,
    },

    /// Shows a company.
    Get {
        /// ID of the company.
        #[arg(value_parser = id::<Id>)]
        id: Id,
    },

    /// Creates a company.
    Create(Company),

    /// Updates a company.
    Update {
        /// ID of the company.
        #[arg(value_parser = id::<Id>)]
        id: Id,

        /// New details of the company.
        #[command(flatten)]
        company: Company,

        /// New activity of the company.
        #[arg(long)]
        active: Option<bool>,
    },

    /// Deletes a company.
    Delete {
        /// ID of the company.
        #[arg(value_parser = id::<Id>)]
        id: Id,
    },
}

/// ID of a company.
pub trait CompanyId:
    Clone + fmt::Debug + FromStr + Send + Sync + 'static
{
}

impl<T> CompanyId for T where
    T: Clone + fmt::Debug + FromStr + Send + Sync + 'static
{
}

/// Details of a company.
#[derive(clap::Args, Debug)]
pub struct Company {
    /// Commercial name.
    #[arg(long)]
    pub name: Option<String>,

    /// Legal name.
    #[arg(long)]
    pub legal_name: Option<String>,

    /// Registration number.
    #[arg(long)]
    pub registration_number: Option<String>,

    /// Contact email.
    #[arg(long)]
    pub email: Option<String>,

    /// Contact phone.
    #[arg(long)]
    pub phone: Option<String>,

    /// City.
    #[arg(long)]
    pub city: Option<String>,

    /// Country.
    #[arg(long)]
    pub country: Option<String>,
}

/// Operation upon leads.
#[derive(Debug, Subcommand)]
pub enum Leads {
    /// Lists leads.
    List {
        /// Pagination of the list.
        #[command(flatten)]
        page: Page,

        /// Status to list leads in.
        #[arg(long)]
        status: Option<lead::Status>,
    },

    /// Shows a lead.
    Get {
        /// ID of the lead.
        id: lead::Id,
    },

    /// Registers a lead.
    Create {
        /// Title of the lead.
        #[arg(long)]
        title: String,

        /// Prospected organization.
        #[arg(long)]
        organization: String,

        /// Contact person in the organization.
        #[arg(long)]
        contact: String,

        /// Details of the lead.
        #[command(flatten)]
        details: LeadDetails,

        /// Initial status of the lead.
        #[arg(long, default_value = "new")]
        status: lead::Status,
    },

    /// Updates a lead.
    Update {
        /// ID of the lead.
        id: lead::Id,

        /// New title of the lead.
        #[arg(long)]
        title: Option<String>,

        /// New prospected organization.
        #[arg(long)]
        organization: Option<String>,

        /// New contact person in the organization.
        #[arg(long)]
        contact: Option<String>,

        /// New details of the lead.
        #[command(flatten)]
        details: LeadDetails,
    },

    /// Attaches a note to a lead.
    Note {
        /// ID of the lead.
        id: lead::Id,

        /// Note to attach.
        #[command(flatten)]
        note: Note,
    },

    /// Changes the status of a lead.
    Status {
        /// ID of the lead.
        id: lead::Id,

        /// Status to change to.
        status: lead::Status,
    },
}

/// Optional details of a lead.
#[derive(clap::Args, Debug)]
pub struct LeadDetails {
    /// Email of the contact person.
    #[arg(long)]
    pub email: Option<String>,

    /// Phone of the contact person.
    #[arg(long)]
    pub phone: Option<String>,

    /// Estimated deal value.
    #[arg(long)]
    pub value: Option<Decimal>,

    /// Currency of the estimated deal value.
    #[arg(long)]
    pub currency: Option<Currency>,

    /// Win probability in percents.
    #[arg(long, value_parser = clap::value_parser!(u8).range(..=100))]
    pub probability: Option<u8>,

    /// ID of the associated partner.
    #[arg(long)]
    pub partner: Option<partner::Id>,

    /// ID of the associated distributor.
    #[arg(long)]
    pub distributor: Option<distributor::Id>,
}

/// Pagination of a list.
#[derive(clap::Args, Clone, Copy, Debug)]
pub struct Page {
    /// Number of the page, starting from `1`.
    #[arg(long, default_value_t = 1)]
    pub page: u32,

    /// Number of items per page.
    #[arg(long)]
    pub page_size: Option<u32>,
}

impl Page {
    /// Converts this [`Page`] into [`Arguments`], defaulting the page size to
    /// the configured one.
    ///
    /// # Errors
    ///
    /// If the page or its size is out of range.
    pub fn arguments(self, conf: &config::List) -> Result<Arguments, Error> {
        let size = self.page_size.unwrap_or(conf.page_size);
        Arguments::new(self.page, size).ok_or_else(|| {
            Error::invalid(
                "INVALID_PAGINATION",
                &format!(
                    "page must be positive and page size within `1..={}`",
                    Arguments::MAX_PAGE_SIZE,
                ),
            )
        })
    }
}

/// [`tier::Candidate`] typed as `MIN..[MAX]@PRICE[/month|/year]`.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct TierArg(pub tier::Candidate);

impl FromStr for TierArg {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        const FORMAT: &str = "expected `MIN..[MAX]@PRICE[/month|/year]`";

        let (range, price) = s.trim().split_once('@').ok_or(FORMAT)?;
        let (min, max) = range.split_once("..").ok_or(FORMAT)?;
        let (price, period) = match price.split_once('/') {
            Some((price, period)) => (
                price,
                period
                    .trim()
                    .parse::<tier::Period>()
                    .map_err(|_| "period must be `month` or `year`")?,
            ),
            None => (price, tier::Period::default()),
        };

        let quantity = |q: &str| {
            let q = q.trim();
            if q.is_empty() {
                return Ok(None);
            }
            q.parse::<u32>()
                .map(Some)
                .map_err(|_| "quantity must be an integer")
        };

        Ok(Self(tier::Candidate {
            min_quantity: quantity(min)?,
            max_quantity: quantity(max)?,
            price_per_unit: Some(price.trim().to_owned())
                .filter(|p| !p.is_empty()),
            period,
        }))
    }
}

/// [`order::NewItem`] typed as `PRODUCT_ID:DURATION_ID:QUANTITY`.
#[derive(Clone, Copy, Debug)]
pub struct ItemArg(pub order::NewItem);

impl FromStr for ItemArg {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        const FORMAT: &str = "expected `PRODUCT_ID:DURATION_ID:QUANTITY`";

        let mut parts = s.trim().splitn(3, ':');
        let mut next = || parts.next().ok_or(FORMAT);
        let product_id = next()?.parse().map_err(|_| "invalid product ID")?;
        let duration_id = next()?.parse().map_err(|_| "invalid duration ID")?;
        let quantity = next()?
            .parse::<u32>()
            .ok()
            .filter(|q| *q > 0)
            .ok_or("quantity must be a positive integer")?;

        Ok(Self(order::NewItem {
            product_id,
            duration_id,
            quantity,
        }))
    }
}

/// Parses an ID of some `T`ype.
fn id<T: FromStr>(s: &str) -> Result<T, &'static str> {
    s.trim().parse().map_err(|_| "invalid ID")
}

/// Parses a [`DateTime`] from a date-time or a bare `YYYY-MM-DD` date.
fn datetime(s: &str) -> Result<DateTime, common::datetime::ParseError> {
    DateTime::parse(s).or_else(|e| {
        DateTime::parse(&format!("{}T00:00:00", s.trim())).map_err(|_| e)
    })
}

#[cfg(test)]
mod spec {
    use std::iter;

    use clap::Parser as _;
    use service::domain::{
        lead,
        product::tier::{Candidate, Period},
    };

    use super::{
        datetime, Args, Command, Companies, Distributors, ItemArg, Leads,
        TierArg,
    };

    fn parse(args: &[&str]) -> Command {
        let args = iter::once("prm").chain(args.iter().copied());
        Args::try_parse_from(args).unwrap().command
    }

    const ID: &str = "3e4f5a6b-7c8d-4e9f-8a0b-1c2d3e4f5a6b";

    #[test]
    fn parses_tiers() {
        assert_eq!(
            "1..10@4.50".parse::<TierArg>().unwrap().0,
            Candidate {
                min_quantity: Some(1),
                max_quantity: Some(10),
                price_per_unit: Some("4.50".to_owned()),
                period: Period::Month,
            },
        );
        assert_eq!(
            "100..@3/year".parse::<TierArg>().unwrap().0,
            Candidate {
                min_quantity: Some(100),
                max_quantity: None,
                price_per_unit: Some("3".to_owned()),
                period: Period::Year,
            },
        );
    }

    #[test]
    fn leaves_missing_values_to_validation() {
        let TierArg(candidate) = "..10@".parse().unwrap();
        assert_eq!(candidate.min_quantity, None);
        assert_eq!(candidate.price_per_unit, None);
    }

    #[test]
    fn rejects_malformed_tiers() {
        for input in ["1-10@4", "1..10", "a..10@4", "1..10@4/week"] {
            assert!(input.parse::<TierArg>().is_err(), "input: {input}");
        }
    }

    #[test]
    fn parses_items() {
        let ItemArg(item) = "7a0e2c44-1b9f-4c1e-b3f3-6a2f8d5e4c10:\
                             9f8e7d6c-5b4a-4392-8170-6f5e4d3c2b1a:3"
            .parse()
            .unwrap();
        assert_eq!(item.quantity, 3);

        assert!("7a0e2c44-1b9f-4c1e-b3f3-6a2f8d5e4c10:x:3"
            .parse::<ItemArg>()
            .is_err());
    }

    #[test]
    fn parses_bare_dates() {
        assert_eq!(
            datetime("2025-03-01").unwrap(),
            datetime("2025-03-01T00:00:00Z").unwrap(),
        );
        assert!(datetime("March").is_err());
    }

    #[test]
    fn nests_company_operations_of_distributors() {
        assert!(matches!(
            parse(&["distributors", "get", ID]),
            Command::Distributors(Distributors::Company(Companies::Get { .. })),
        ));
        assert!(matches!(
            parse(&["distributors", "assign", ID, ID, "--notes", "EU"]),
            Command::Distributors(Distributors::Assign { notes: Some(_), .. }),
        ));
        assert!(matches!(
            parse(&["distributors", "partners", ID]),
            Command::Distributors(Distributors::Partners { .. }),
        ));
    }

    #[test]
    fn creates_new_leads_by_default() {
        let Command::Leads(Leads::Create {
            status, details, ..
        }) = parse(&[
            "leads",
            "create",
            "--title",
            "Backup rollout",
            "--organization",
            "Acme",
            "--contact",
            "Jane Doe",
            "--currency",
            "usd",
        ])
        else {
            panic!("expected `leads create`");
        };
        assert_eq!(status, lead::Status::New);
        assert_eq!(details.currency.map(|c| c.to_string()), Some("USD".into()));

        assert!(Args::try_parse_from([
            "prm",
            "leads",
            "update",
            ID,
            "--probability",
            "101",
        ])
        .is_err());
    }
}
