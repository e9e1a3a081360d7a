//! The form for recording a new expense.

use maud::{Markup, html};
use serde::{Deserialize, Serialize};
use time::Date;

use crate::{
    endpoints,
    html::{BUTTON_PRIMARY_STYLE, FORM_LABEL_STYLE, FORM_TEXT_INPUT_STYLE},
    transaction::DATE_FORMAT,
};

/// The form data for creating an expense.
///
/// Fields are kept as the raw submitted text so that an incomplete submission
/// can be echoed back to the user unchanged.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExpenseForm {
    /// Text detailing the expense.
    #[serde(default)]
    pub description: String,
    /// The value of the expense.
    #[serde(default)]
    pub amount: String,
    /// The date when the expense ocurred, "YYYY-MM-DD".
    #[serde(default)]
    pub date: String,
}

/// The fields of a submitted [ExpenseForm] that passed validation.
#[derive(Debug, Clone, PartialEq)]
pub struct NewExpense {
    pub description: String,
    pub amount: f64,
    pub date: String,
}

impl ExpenseForm {
    /// An empty form: no description, an amount of zero and `today` as the date.
    pub fn cleared(today: Date) -> Self {
        Self {
            description: String::new(),
            amount: "0".to_owned(),
            date: today.format(DATE_FORMAT).unwrap_or_default(),
        }
    }

    /// Check that the description is not blank, the amount is a finite number
    /// and the date is present.
    ///
    /// Returns `None` if any check fails. Whether the date is a valid calendar
    /// date is left to [crate::TransactionStore::add].
    pub fn validate(&self) -> Option<NewExpense> {
        if self.description.trim().is_empty() {
            return None;
        }

        let amount = self
            .amount
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|amount| amount.is_finite())?;

        if self.date.trim().is_empty() {
            return None;
        }

        Some(NewExpense {
            description: self.description.clone(),
            amount,
            date: self.date.clone(),
        })
    }
}

pub fn expense_form_view(form: &ExpenseForm) -> Markup {
    html! {
        form
            id="expense-form"
            method="post"
            action=(endpoints::EXPENSES)
            hx-post=(endpoints::EXPENSES)
            hx-target="#expense-tracker"
            hx-swap="outerHTML"
            hx-target-error="#alert-container"
            class="expense-form"
        {
            div
            {
                label for="description" class=(FORM_LABEL_STYLE) { "Description" }

                input
                    name="description"
                    id="description"
                    type="text"
                    placeholder="Description"
                    required
                    value=(form.description)
                    class=(FORM_TEXT_INPUT_STYLE);
            }

            div
            {
                label for="amount" class=(FORM_LABEL_STYLE) { "Amount" }

                input
                    name="amount"
                    id="amount"
                    type="number"
                    step="0.01"
                    required
                    value=(form.amount)
                    class=(FORM_TEXT_INPUT_STYLE);
            }

            div
            {
                label for="date" class=(FORM_LABEL_STYLE) { "Date" }

                input
                    name="date"
                    id="date"
                    type="date"
                    required
                    value=(form.date)
                    class=(FORM_TEXT_INPUT_STYLE);
            }

            button type="submit" class=(BUTTON_PRIMARY_STYLE) { "Add Expense" }
        }
    }
}
