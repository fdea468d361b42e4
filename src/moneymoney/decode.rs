//! Decoding of MoneyMoney property list answers

use std::io::Cursor;
use std::path::Path;
use std::time::SystemTime;

use chrono::{DateTime, Local, NaiveDate};
use plist::{Dictionary, Value};

use crate::config::is_closed_group;
use crate::error::{MmError, MmResult};
use crate::models::account::looks_like_iban;
use crate::models::category::{leaf_name, PATH_SEPARATOR};
use crate::models::{
    Account, AccountType, Category, CategoryType, Money, Portfolio, Security, Transaction,
};

/// Parse an export answer
///
/// MoneyMoney answers with the XML document itself; older versions answer
/// with the path of a temporary plist file instead.
pub fn read_answer(output: &str) -> MmResult<Value> {
    let trimmed = output.trim();
    if trimmed.starts_with("<?xml") || trimmed.starts_with("<plist") {
        return Ok(Value::from_reader_xml(Cursor::new(trimmed.as_bytes()))?);
    }

    let path = Path::new(trimmed);
    if trimmed.is_empty() || !path.exists() {
        return Err(MmError::Plist(format!(
            "expected plist data or a file path, got '{}'",
            truncate_for_error(trimmed)
        )));
    }
    Ok(Value::from_file(path)?)
}

/// Accounts from `export accounts`
///
/// Entries flagged as `group` are section headers; the accounts that follow
/// belong to that group.
pub fn accounts(value: &Value, closed_groups: &[String]) -> MmResult<Vec<Account>> {
    let items = array(value, "accounts")?;
    let mut accounts = Vec::new();
    let mut current_group = String::new();

    for dict in items.iter().filter_map(Value::as_dictionary) {
        if boolean(dict, "group", false) {
            current_group = string(dict, "name");
            continue;
        }

        let account_number = string(dict, "accountNumber");
        let (balance, currency) = balance(dict.get("balance"));
        let bank_code = string(dict, "bankCode");
        let bank_name = opt_string(dict, "bankName").unwrap_or_else(|| bank_code.clone());
        let id = opt_string(dict, "uuid").unwrap_or_else(|| account_number.clone());
        let iban = if looks_like_iban(&account_number) {
            account_number.clone()
        } else {
            String::new()
        };
        let closed = is_closed_group(closed_groups, &current_group);

        accounts.push(Account {
            id,
            name: string(dict, "name"),
            account_number,
            bank_name,
            balance,
            currency,
            account_type: AccountType::from_moneymoney(&string(dict, "type")),
            owner: string(dict, "owner"),
            iban,
            bic: bank_code,
            group: current_group.clone(),
            portfolio: boolean(dict, "portfolio", false),
            closed,
        });
    }

    Ok(accounts)
}

/// Balance is `[[amount, currency]]`, occasionally flattened to `[amount, currency]`
fn balance(value: Option<&Value>) -> (Money, String) {
    let default = (Money::zero(), "EUR".to_string());
    let Some(outer) = value.and_then(Value::as_array) else {
        return default;
    };
    let pair = match outer.first() {
        Some(Value::Array(inner)) => inner.as_slice(),
        Some(_) => outer.as_slice(),
        None => return default,
    };

    match pair.first().and_then(number) {
        Some(amount) => {
            let currency = pair
                .get(1)
                .and_then(Value::as_string)
                .unwrap_or("EUR")
                .to_string();
            (Money::from_f64(amount), currency)
        }
        None => default,
    }
}

/// Categories from `export categories`
///
/// The export is flat; each entry carries its indentation depth, so a stack
/// of ancestors rebuilds parents and paths.
pub fn categories(value: &Value) -> MmResult<Vec<Category>> {
    let items = array(value, "categories")?;
    let mut categories = Vec::new();
    let mut ancestors: Vec<(String, String)> = Vec::new();

    for dict in items.iter().filter_map(Value::as_dictionary) {
        let id = string(dict, "uuid");
        let name = string(dict, "name");
        let indentation = integer(dict, "indentation").max(0) as usize;

        ancestors.truncate(indentation);
        let parent = ancestors.last().cloned();

        let mut path = ancestors
            .iter()
            .map(|(_, n)| n.as_str())
            .collect::<Vec<_>>()
            .join(&PATH_SEPARATOR.to_string());
        if !path.is_empty() {
            path.push(PATH_SEPARATOR);
        }
        path.push_str(&name);

        let (budget, budget_period, budget_available) = budget(dict.get("budget"));
        let category_type = if integer(dict, "type") == 1 {
            CategoryType::Income
        } else {
            CategoryType::Expense
        };

        categories.push(Category {
            id: id.clone(),
            name: name.clone(),
            category_type,
            parent_id: parent.as_ref().map(|(id, _)| id.clone()),
            parent_name: parent.map(|(_, name)| name),
            budget,
            budget_period,
            budget_available,
            indentation,
            group: boolean(dict, "group", false),
            rules: string(dict, "rules"),
            path,
        });

        ancestors.push((id, name));
    }

    Ok(categories)
}

/// Budget is a dict `{amount, period, available}` or a bare number
fn budget(value: Option<&Value>) -> (Option<Money>, Option<String>, Option<Money>) {
    match value {
        Some(Value::Dictionary(dict)) => {
            let amount = dict
                .get("amount")
                .and_then(number)
                .map(Money::from_f64)
                .filter(Money::is_positive);
            let period = opt_string(dict, "period");
            let available = dict.get("available").and_then(number).map(Money::from_f64);
            (amount, period, available)
        }
        Some(other) => (
            number(other).map(Money::from_f64).filter(Money::is_positive),
            None,
            None,
        ),
        None => (None, None, None),
    }
}

/// Transactions from `export transactions ... as "plist"`
pub fn transactions(value: &Value) -> MmResult<Vec<Transaction>> {
    let items = match value {
        Value::Dictionary(dict) => match dict.get("transactions") {
            Some(list) => list.as_array().ok_or_else(|| {
                MmError::Plist("'transactions' is not a list".to_string())
            })?,
            None => return Ok(Vec::new()),
        },
        other => array(other, "transactions")?,
    };

    let today = Local::now().date_naive();
    let mut transactions = Vec::with_capacity(items.len());

    for dict in items.iter().filter_map(Value::as_dictionary) {
        let booking_date = date(dict, "bookingDate").unwrap_or(today);
        let category_path = opt_string(dict, "category");
        let counterparty = string(dict, "accountNumber");

        transactions.push(Transaction {
            id: id_string(dict.get("id")),
            account_id: string(dict, "accountUuid"),
            account_name: string(dict, "accountName"),
            booking_date,
            value_date: date(dict, "valueDate").unwrap_or(booking_date),
            amount: dict
                .get("amount")
                .and_then(number)
                .map(Money::from_f64)
                .unwrap_or_default(),
            currency: opt_string(dict, "currency").unwrap_or_else(|| "EUR".to_string()),
            name: string(dict, "name"),
            purpose: string(dict, "purpose"),
            category_id: opt_string(dict, "categoryUuid"),
            category_name: category_path.as_deref().map(|p| leaf_name(p).to_string()),
            checkmark: boolean(dict, "checkmark", false),
            comment: string(dict, "comment"),
            booked: boolean(dict, "booked", true),
            counterparty_iban: (!counterparty.is_empty()).then_some(counterparty),
        });
    }

    Ok(transactions)
}

/// Depots from `export portfolio`
///
/// The answer is a list of depots, or a single depot when filtered by account.
pub fn portfolios(value: &Value) -> MmResult<Vec<Portfolio>> {
    let depots: Vec<&Dictionary> = match value {
        Value::Dictionary(dict) => vec![dict],
        other => array(other, "portfolio")?
            .iter()
            .filter_map(Value::as_dictionary)
            .collect(),
    };

    Ok(depots
        .into_iter()
        .map(|dict| {
            let securities = dict
                .get("securities")
                .and_then(Value::as_array)
                .map(|list| {
                    list.iter()
                        .filter_map(Value::as_dictionary)
                        .map(security)
                        .collect()
                })
                .unwrap_or_default();
            Portfolio::new(string(dict, "name"), string(dict, "uuid"), securities)
        })
        .collect())
}

fn security(dict: &Dictionary) -> Security {
    let real = |key: &str| dict.get(key).and_then(number).unwrap_or(0.0);
    Security::new(
        string(dict, "name"),
        string(dict, "isin"),
        real("quantity"),
        real("purchasePrice"),
        real("price"),
        opt_string(dict, "currency").unwrap_or_else(|| "EUR".to_string()),
        Money::from_f64(real("marketValue")),
        string(dict, "assetClass"),
    )
}

fn array<'a>(value: &'a Value, what: &str) -> MmResult<&'a Vec<Value>> {
    value
        .as_array()
        .ok_or_else(|| MmError::Plist(format!("expected a list of {}", what)))
}

fn string(dict: &Dictionary, key: &str) -> String {
    opt_string(dict, key).unwrap_or_default()
}

fn opt_string(dict: &Dictionary, key: &str) -> Option<String> {
    dict.get(key)
        .and_then(Value::as_string)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

fn id_string(value: Option<&Value>) -> String {
    match value {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Integer(i)) => i
            .as_signed()
            .map(|n| n.to_string())
            .or_else(|| i.as_unsigned().map(|n| n.to_string()))
            .unwrap_or_default(),
        Some(Value::Real(r)) => format!("{}", *r as i64),
        _ => String::new(),
    }
}

fn number(value: &Value) -> Option<f64> {
    value
        .as_real()
        .or_else(|| value.as_signed_integer().map(|i| i as f64))
        .or_else(|| value.as_unsigned_integer().map(|u| u as f64))
}

fn integer(dict: &Dictionary, key: &str) -> i64 {
    dict.get(key)
        .and_then(|v| v.as_signed_integer().or_else(|| v.as_real().map(|r| r as i64)))
        .unwrap_or(0)
}

fn boolean(dict: &Dictionary, key: &str, default: bool) -> bool {
    match dict.get(key) {
        Some(Value::Boolean(b)) => *b,
        Some(Value::Integer(i)) => i.as_signed() != Some(0),
        _ => default,
    }
}

fn date(dict: &Dictionary, key: &str) -> Option<NaiveDate> {
    match dict.get(key)? {
        Value::Date(d) => {
            let local: DateTime<Local> = SystemTime::from(d.clone()).into();
            Some(local.date_naive())
        }
        Value::String(s) => s
            .get(..10)
            .and_then(|prefix| NaiveDate::parse_from_str(prefix, "%Y-%m-%d").ok()),
        _ => None,
    }
}

fn truncate_for_error(s: &str) -> String {
    s.chars().take(80).collect()
}

#[cfg(test)]
pub(crate) mod fixtures {
    pub const ACCOUNTS: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<!DOCTYPE plist PUBLIC "-//Apple//DTD PLIST 1.0//EN" "http://www.apple.com/DTDs/PropertyList-1.0.dtd">
<plist version="1.0">
<array>
  <dict><key>name</key><string>Privat</string><key>group</key><true/></dict>
  <dict>
    <key>uuid</key><string>acc-giro</string>
    <key>accountNumber</key><string>DE89370400440532013000</string>
    <key>name</key><string>Girokonto</string>
    <key>bankName</key><string>Commerzbank</string>
    <key>bankCode</key><string>COBADEFFXXX</string>
    <key>balance</key><array><array><real>1234.56</real><string>EUR</string></array></array>
    <key>type</key><string>Girokonto</string>
    <key>owner</key><string>Max Mustermann</string>
    <key>group</key><false/>
    <key>portfolio</key><false/>
  </dict>
  <dict>
    <key>uuid</key><string>acc-visa</string>
    <key>accountNumber</key><string>4111XXXXXXXX1111</string>
    <key>name</key><string>Visa</string>
    <key>bankCode</key><string>LBB</string>
    <key>balance</key><array><real>-250.5</real><string>EUR</string></array>
    <key>type</key><string>Kreditkarte</string>
  </dict>
  <dict><key>name</key><string>Aufgelöst</string><key>group</key><true/></dict>
  <dict>
    <key>uuid</key><string>acc-old</string>
    <key>accountNumber</key><string>DE27100777770209299700</string>
    <key>name</key><string>Altes Tagesgeld</string>
    <key>type</key><string>Tagesgeldkonto</string>
  </dict>
</array>
</plist>"#;

    pub const CATEGORIES: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<plist version="1.0">
<array>
  <dict>
    <key>uuid</key><string>cat-income</string>
    <key>name</key><string>Einkommen</string>
    <key>type</key><integer>1</integer>
    <key>indentation</key><integer>0</integer>
    <key>group</key><true/>
  </dict>
  <dict>
    <key>uuid</key><string>cat-salary</string>
    <key>name</key><string>Gehalt</string>
    <key>type</key><integer>1</integer>
    <key>indentation</key><integer>1</integer>
    <key>group</key><false/>
    <key>rules</key><string>name:"ACME GmbH"</string>
  </dict>
  <dict>
    <key>uuid</key><string>cat-living</string>
    <key>name</key><string>Lebenshaltung</string>
    <key>type</key><integer>0</integer>
    <key>indentation</key><integer>0</integer>
    <key>group</key><true/>
  </dict>
  <dict>
    <key>uuid</key><string>cat-food</string>
    <key>name</key><string>Lebensmittel</string>
    <key>type</key><integer>0</integer>
    <key>indentation</key><integer>1</integer>
    <key>group</key><false/>
    <key>budget</key>
    <dict>
      <key>amount</key><real>400</real>
      <key>period</key><string>monthly</string>
      <key>available</key><real>123.45</real>
    </dict>
    <key>rules</key><string>REWE OR EDEKA</string>
  </dict>
  <dict>
    <key>uuid</key><string>cat-transfer</string>
    <key>name</key><string>Umbuchungen</string>
    <key>type</key><integer>0</integer>
    <key>indentation</key><integer>0</integer>
    <key>group</key><false/>
    <key>budget</key><real>0</real>
  </dict>
</array>
</plist>"#;

    pub const TRANSACTIONS: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<plist version="1.0">
<dict>
  <key>creator</key><string>MoneyMoney</string>
  <key>transactions</key>
  <array>
    <dict>
      <key>id</key><integer>1001</integer>
      <key>accountUuid</key><string>acc-giro</string>
      <key>accountName</key><string>Girokonto</string>
      <key>bookingDate</key><date>2026-01-15T12:00:00Z</date>
      <key>valueDate</key><date>2026-01-16T12:00:00Z</date>
      <key>amount</key><real>-45.99</real>
      <key>currency</key><string>EUR</string>
      <key>name</key><string>REWE Markt</string>
      <key>purpose</key><string>Einkauf</string>
      <key>category</key><string>Lebenshaltung\Lebensmittel</string>
      <key>categoryUuid</key><string>cat-food</string>
      <key>checkmark</key><true/>
      <key>booked</key><true/>
    </dict>
    <dict>
      <key>id</key><integer>1002</integer>
      <key>accountUuid</key><string>acc-giro</string>
      <key>accountName</key><string>Girokonto</string>
      <key>bookingDate</key><string>2026-01-20</string>
      <key>amount</key><integer>500</integer>
      <key>name</key><string>Max Mustermann</string>
      <key>accountNumber</key><string>DE27100777770209299700</string>
      <key>comment</key><string>Sparen</string>
      <key>booked</key><false/>
    </dict>
  </array>
</dict>
</plist>"#;

    pub const PORTFOLIO: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<plist version="1.0">
<array>
  <dict>
    <key>name</key><string>Depot Commerzbank</string>
    <key>uuid</key><string>depot-uuid-1</string>
    <key>securities</key>
    <array>
      <dict>
        <key>name</key><string>iShares Core MSCI World</string>
        <key>isin</key><string>IE00B4L5Y983</string>
        <key>quantity</key><real>50</real>
        <key>purchasePrice</key><real>65</real>
        <key>price</key><real>78.5</real>
        <key>currency</key><string>EUR</string>
        <key>marketValue</key><real>3925</real>
        <key>assetClass</key><string>Equity</string>
      </dict>
      <dict>
        <key>name</key><string>Xtrackers DAX ETF</string>
        <key>isin</key><string>LU0274211480</string>
        <key>quantity</key><real>20</real>
        <key>purchasePrice</key><real>140</real>
        <key>price</key><real>132.5</real>
        <key>currency</key><string>EUR</string>
        <key>marketValue</key><real>2650</real>
        <key>assetClass</key><string>Equity</string>
      </dict>
    </array>
  </dict>
</array>
</plist>"#;
}
