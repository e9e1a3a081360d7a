//! HTML rendering for the expense tracker.
//!
//! Every function here is a pure projection of the store: the whole list is
//! rendered from scratch after each change rather than patched.

use maud::{Markup, html};

use crate::{
    currency::CurrencyFormatter,
    endpoints::{self, format_endpoint},
    html::{BUTTON_DELETE_STYLE, PAGE_CONTAINER_STYLE, base},
    store::TransactionStore,
    transaction::{DATE_FORMAT, Transaction},
};

use super::form::{ExpenseForm, expense_form_view};

fn amount_class(amount: f64) -> &'static str {
    if amount < 0.0 { "amount negative" } else { "amount" }
}

/// One list item per transaction, in the order given.
pub fn expense_list_view(transactions: &[Transaction], currency: &CurrencyFormatter) -> Markup {
    html! {
        ul id="expense-list" class="expense-list"
        {
            @for transaction in transactions {
                (expense_row_view(transaction, currency))
            }
        }
    }
}

fn expense_row_view(transaction: &Transaction, currency: &CurrencyFormatter) -> Markup {
    // An invalid or unformattable date leaves the date blank instead of failing the render.
    let date_text = transaction
        .date
        .as_date()
        .and_then(|date| date.format(DATE_FORMAT).ok())
        .unwrap_or_default();
    let delete_url = format_endpoint(endpoints::DELETE_EXPENSE, transaction.id.as_str());

    html! {
        li
            data-transaction-id=(transaction.id.as_str())
            data-amount=(transaction.amount)
        {
            div class="expense-item"
            {
                h2 { (transaction.description) }
                p { (date_text) }
            }

            div class=(amount_class(transaction.amount))
            {
                (currency.format(transaction.amount))
            }

            div class="action"
            {
                button
                    type="button"
                    class=(BUTTON_DELETE_STYLE)
                    hx-delete=(delete_url)
                    hx-target="#expense-summary"
                    hx-swap="outerHTML"
                    hx-target-error="#alert-container"
                    aria-label={ "Delete " (transaction.description) }
                {
                    "Delete"
                }
            }
        }
    }
}

/// The total of all expenses, e.g. "Total Expense: EGP 70.00".
pub fn total_view(total: f64, currency: &CurrencyFormatter) -> Markup {
    html! {
        p id="total-expense" class="total"
        {
            "Total Expense: " (currency.format(total))
        }
    }
}

/// The list and the total, swapped into the page after a deletion.
pub fn expense_summary_view(store: &TransactionStore, currency: &CurrencyFormatter) -> Markup {
    html! {
        div id="expense-summary"
        {
            (expense_list_view(store.list(), currency))

            @if store.is_empty() {
                p class="empty-state" { "No expenses yet." }
            }

            (total_view(store.total(), currency))
        }
    }
}

/// The form together with the list and total, swapped into the page after a
/// form submission.
pub fn expense_tracker_view(
    form: &ExpenseForm,
    store: &TransactionStore,
    currency: &CurrencyFormatter,
) -> Markup {
    html! {
        section id="expense-tracker"
        {
            (expense_form_view(form))
            (expense_summary_view(store, currency))
        }
    }
}

/// The full expense tracker page.
pub fn expenses_page(
    form: &ExpenseForm,
    store: &TransactionStore,
    currency: &CurrencyFormatter,
) -> Markup {
    let content = html! {
        main class=(PAGE_CONTAINER_STYLE)
        {
            h1 { "Expense Tracker" }

            (expense_tracker_view(form, store, currency))
        }
    };

    base("Expenses", &content)
}
