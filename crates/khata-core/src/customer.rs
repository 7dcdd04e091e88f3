//! # Customer Registration
//!
//! The "New Account" form: an explicit list of fields, each with its own
//! kind and validator, and the add-customer request built from it.
//!
//! ## Form Fields
//! ```text
//! ┌──────────────┬───────────────┬────────────┬────────────────────────────┐
//! │ Field        │ Key           │ Kind       │ Rule                       │
//! ├──────────────┼───────────────┼────────────┼────────────────────────────┤
//! │ Name         │ name          │ Text       │ required, ≤ 100 chars      │
//! │ GroupName    │ groupName     │ Choice     │ one of AccountGroup        │
//! │ ContactName  │ contactName   │ Text       │ ≤ 100 chars                │
//! │ Address1     │ address1      │ Text       │ ≤ 100 chars                │
//! │ Address2     │ address2      │ Text       │ ≤ 100 chars                │
//! │ City         │ city          │ Text       │ ≤ 100 chars                │
//! │ PostalCode   │ postalCode    │ PostalCode │ empty or 6-digit PIN       │
//! │ State        │ state         │ Text       │ ≤ 100 chars                │
//! │ Country      │ country       │ Text       │ ≤ 100 chars                │
//! │ GstNo        │ gstNo         │ Gstin      │ empty or valid GSTIN       │
//! └──────────────┴───────────────┴────────────┴────────────────────────────┘
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use ts_rs::TS;

use crate::error::{CoreResult, ValidationError};
use crate::types::CompanySession;
use crate::validation::{
    validate_gstin, validate_optional_text, validate_postal_code, validate_required_text,
    ValidationResult,
};
use crate::MAX_TEXT_FIELD_LEN;

// =============================================================================
// Account Group
// =============================================================================

/// Ledger group a new account is created under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum AccountGroup {
    #[default]
    #[serde(rename = "Sundry Debtors (Customers)")]
    SundryDebtors,
    #[serde(rename = "Sundry Creditors (Suppliers)")]
    SundryCreditors,
}

impl AccountGroup {
    pub const ALL: [AccountGroup; 2] = [AccountGroup::SundryDebtors, AccountGroup::SundryCreditors];

    /// Label shown in the picker and sent to the backend.
    pub const fn label(&self) -> &'static str {
        match self {
            AccountGroup::SundryDebtors => "Sundry Debtors (Customers)",
            AccountGroup::SundryCreditors => "Sundry Creditors (Suppliers)",
        }
    }
}

impl fmt::Display for AccountGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for AccountGroup {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        AccountGroup::ALL
            .into_iter()
            .find(|group| group.label().eq_ignore_ascii_case(s))
            .ok_or_else(|| ValidationError::NotAllowed {
                field: CustomerField::GroupName.key().to_string(),
                allowed: AccountGroup::ALL.iter().map(|g| g.label().to_string()).collect(),
            })
    }
}

// =============================================================================
// Form Fields
// =============================================================================

/// How a field is entered and checked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
    Text,
    Choice,
    PostalCode,
    Gstin,
}

/// One field of the customer form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CustomerField {
    Name,
    GroupName,
    ContactName,
    Address1,
    Address2,
    City,
    PostalCode,
    State,
    Country,
    GstNo,
}

impl CustomerField {
    /// All fields in display order.
    pub const ALL: [CustomerField; 10] = [
        CustomerField::Name,
        CustomerField::GroupName,
        CustomerField::ContactName,
        CustomerField::Address1,
        CustomerField::Address2,
        CustomerField::City,
        CustomerField::PostalCode,
        CustomerField::State,
        CustomerField::Country,
        CustomerField::GstNo,
    ];

    /// Wire/form key (`postalCode`).
    pub const fn key(&self) -> &'static str {
        match self {
            CustomerField::Name => "name",
            CustomerField::GroupName => "groupName",
            CustomerField::ContactName => "contactName",
            CustomerField::Address1 => "address1",
            CustomerField::Address2 => "address2",
            CustomerField::City => "city",
            CustomerField::PostalCode => "postalCode",
            CustomerField::State => "state",
            CustomerField::Country => "country",
            CustomerField::GstNo => "gstNo",
        }
    }

    /// Label shown above the input.
    pub const fn label(&self) -> &'static str {
        match self {
            CustomerField::Name => "Name",
            CustomerField::GroupName => "Group",
            CustomerField::ContactName => "Contact Name",
            CustomerField::Address1 => "Address Line 1",
            CustomerField::Address2 => "Address Line 2",
            CustomerField::City => "City",
            CustomerField::PostalCode => "PIN Code",
            CustomerField::State => "State",
            CustomerField::Country => "Country",
            CustomerField::GstNo => "GST No.",
        }
    }

    pub const fn kind(&self) -> FieldKind {
        match self {
            CustomerField::GroupName => FieldKind::Choice,
            CustomerField::PostalCode => FieldKind::PostalCode,
            CustomerField::GstNo => FieldKind::Gstin,
            _ => FieldKind::Text,
        }
    }

    pub const fn is_required(&self) -> bool {
        matches!(self, CustomerField::Name | CustomerField::GroupName)
    }

    /// Validates `text` as this field's value.
    pub fn validate(&self, text: &str) -> ValidationResult<()> {
        let key = self.key();
        match self.kind() {
            FieldKind::Text if self.is_required() => {
                validate_required_text(key, text, MAX_TEXT_FIELD_LEN)?;
            }
            FieldKind::Text => {
                validate_optional_text(key, text, MAX_TEXT_FIELD_LEN)?;
            }
            FieldKind::Choice => {
                text.parse::<AccountGroup>()?;
            }
            FieldKind::PostalCode if !text.trim().is_empty() => validate_postal_code(text)?,
            FieldKind::Gstin if !text.trim().is_empty() => validate_gstin(text)?,
            FieldKind::PostalCode | FieldKind::Gstin => {}
        }
        Ok(())
    }
}

impl FromStr for CustomerField {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CustomerField::ALL
            .into_iter()
            .find(|field| field.key() == s)
            .ok_or_else(|| ValidationError::UnknownField(s.to_string()))
    }
}

// =============================================================================
// Customer Form
// =============================================================================

/// State of the "New Account" form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CustomerForm {
    pub name: String,
    #[serde(rename = "groupName")]
    pub group: AccountGroup,
    pub contact_name: String,
    pub address1: String,
    pub address2: String,
    pub city: String,
    pub postal_code: String,
    pub state: String,
    pub country: String,
    pub gst_no: String,
}

impl CustomerForm {
    pub fn new() -> Self {
        CustomerForm::default()
    }

    /// Current text of `field`.
    pub fn get(&self, field: CustomerField) -> &str {
        match field {
            CustomerField::GroupName => self.group.label(),
            CustomerField::Name => &self.name,
            CustomerField::ContactName => &self.contact_name,
            CustomerField::Address1 => &self.address1,
            CustomerField::Address2 => &self.address2,
            CustomerField::City => &self.city,
            CustomerField::PostalCode => &self.postal_code,
            CustomerField::State => &self.state,
            CustomerField::Country => &self.country,
            CustomerField::GstNo => &self.gst_no,
        }
    }

    /// Sets `field` from input text.
    ///
    /// Text fields accept anything (checked by [`validate`](Self::validate));
    /// the group must name one of the account groups.
    pub fn set(&mut self, field: CustomerField, text: &str) -> ValidationResult<()> {
        let slot = match field {
            CustomerField::GroupName => {
                self.group = text.parse()?;
                return Ok(());
            }
            CustomerField::Name => &mut self.name,
            CustomerField::ContactName => &mut self.contact_name,
            CustomerField::Address1 => &mut self.address1,
            CustomerField::Address2 => &mut self.address2,
            CustomerField::City => &mut self.city,
            CustomerField::PostalCode => &mut self.postal_code,
            CustomerField::State => &mut self.state,
            CustomerField::Country => &mut self.country,
            CustomerField::GstNo => &mut self.gst_no,
        };
        *slot = text.to_string();
        Ok(())
    }

    /// Validates every field in display order, stopping at the first error.
    pub fn validate(&self) -> ValidationResult<()> {
        CustomerField::ALL
            .iter()
            .try_for_each(|field| field.validate(self.get(*field)))
    }
}

// =============================================================================
// Add-Customer Request
// =============================================================================

/// Registration type tag sent with every new account (regular).
const REG_TYPE: &str = "R";
/// Debtor tag sent with every new account.
const DEBTOR_TAG: &str = "D";
/// Ledger flag sent with every new account.
const LEDGER_FLAG: &str = "L";
/// Backend ledger group code for new accounts.
const GROUP_CODE: &str = "000000023";

/// The backend's add-customer request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
pub struct NewCustomerRequest {
    pub name: String,
    #[serde(rename = "groupName")]
    pub group_name: String,
    #[serde(rename = "contactName")]
    pub contact_name: String,
    pub address1: String,
    pub address2: String,
    pub city: String,
    #[serde(rename = "postalCode")]
    pub postal_code: String,
    pub state: String,
    pub country: String,
    #[serde(rename = "gstNo")]
    pub gst_no: String,
    #[serde(rename = "companyId")]
    pub company_id: i64,
    #[serde(rename = "userId")]
    pub user_id: i64,
    #[serde(rename = "regType_tag3")]
    pub reg_type: String,
    #[serde(rename = "D_tag5")]
    pub debtor_tag: String,
    #[serde(rename = "created_by_userId")]
    pub created_by: i64,
    #[serde(rename = "modified_by_userId")]
    pub modified_by: i64,
    #[ts(as = "String")]
    pub modified_date: DateTime<Utc>,
    #[serde(rename = "flag_L")]
    pub ledger_flag: String,
    #[serde(rename = "groupCode")]
    pub group_code: String,
}

impl NewCustomerRequest {
    /// Validates `form` and builds the request, trimming every text field.
    pub fn build(
        form: &CustomerForm,
        session: &CompanySession,
        now: DateTime<Utc>,
    ) -> CoreResult<NewCustomerRequest> {
        form.validate()?;

        let text = |field: CustomerField| form.get(field).trim().to_string();

        Ok(NewCustomerRequest {
            name: text(CustomerField::Name),
            group_name: form.group.label().to_string(),
            contact_name: text(CustomerField::ContactName),
            address1: text(CustomerField::Address1),
            address2: text(CustomerField::Address2),
            city: text(CustomerField::City),
            postal_code: text(CustomerField::PostalCode),
            state: text(CustomerField::State),
            country: text(CustomerField::Country),
            gst_no: text(CustomerField::GstNo).to_ascii_uppercase(),
            company_id: session.company_id,
            user_id: session.user_id,
            reg_type: REG_TYPE.to_string(),
            debtor_tag: DEBTOR_TAG.to_string(),
            created_by: session.user_id,
            modified_by: session.user_id,
            modified_date: now,
            ledger_flag: LEDGER_FLAG.to_string(),
            group_code: GROUP_CODE.to_string(),
        })
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
