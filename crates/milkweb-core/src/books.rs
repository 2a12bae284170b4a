//! Shared business state
//!
//! `Books` owns the loaded vendor data and is the query interface the
//! HTTP layer talks to. Reads never mutate; the only writes are the
//! record_* operations, which also maintain the cached customer totals
//! (pending = total - paid) and persist through the store backend in
//! the same call.

use chrono::NaiveDate;
use log::info;
use milkweb_config::Config;
use milkweb_store::{StoreRef, VendorData};
use rust_decimal::Decimal;
use std::path::PathBuf;

use crate::error::CoreError;
use crate::history::{customer_history, CustomerHistory};
use crate::models::{Customer, Order, OrderItem, OrderStatus, Payment};
use crate::reports::BooksStats;
use crate::statement::{statement_transactions, summarize, Statement, StatementFilter};

/// Main business state
pub struct Books {
    config: Config,
    backend: StoreRef,
    entry: PathBuf,
    loaded: bool,
    customers: Vec<Customer>,
    orders: Vec<Order>,
    payments: Vec<Payment>,
}

impl Books {
    /// Create empty books with config and store backend
    pub fn new(config: Config, backend: StoreRef) -> Self {
        Self {
            config,
            backend,
            entry: PathBuf::new(),
            loaded: false,
            customers: Vec::new(),
            orders: Vec::new(),
            payments: Vec::new(),
        }
    }

    /// Load vendor data from the given file
    pub async fn load(&mut self, entry: PathBuf) -> Result<(), CoreError> {
        let data = self.backend.load(entry.clone()).await?;

        self.customers = data.customers.into_iter().map(Customer::from).collect();
        self.orders = data.orders.into_iter().map(Order::from).collect();
        self.payments = data.payments.into_iter().map(Payment::from).collect();
        self.entry = entry;
        self.loaded = true;

        info!(
            "Vendor data loaded: {} customers, {} orders, {} payments",
            self.customers.len(),
            self.orders.len(),
            self.payments.len()
        );
        Ok(())
    }

    /// Reload from the previously loaded file
    pub async fn reload(&mut self) -> Result<(), CoreError> {
        if self.loaded {
            self.load(self.entry.clone()).await
        } else {
            Err(CoreError::NotLoaded)
        }
    }

    /// Whether a data file has been loaded
    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    /// Application configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    // ==================== Read Queries ====================

    /// All customers
    pub fn customers(&self) -> &[Customer] {
        &self.customers
    }

    /// Look up one customer by id
    pub fn customer(&self, id: &str) -> Option<&Customer> {
        self.customers.iter().find(|c| c.id == id)
    }

    /// Search customers by name or phone (case-insensitive substring)
    pub fn search_customers(&self, query: &str) -> Vec<Customer> {
        let needle = query.to_lowercase();
        self.customers
            .iter()
            .filter(|c| {
                c.name.to_lowercase().contains(&needle) || c.phone.to_lowercase().contains(&needle)
            })
            .cloned()
            .collect()
    }

    /// All orders
    pub fn orders(&self) -> &[Order] {
        &self.orders
    }

    /// All payments
    pub fn payments(&self) -> &[Payment] {
        &self.payments
    }

    /// Orders within the filter window, inclusive on both boundary dates
    pub fn filtered_orders(&self, filter: &StatementFilter) -> Vec<Order> {
        self.orders
            .iter()
            .filter(|o| filter.matches_customer(&o.customer_id))
            .filter(|o| o.date_naive().map(|d| filter.contains(&d)).unwrap_or(false))
            .cloned()
            .collect()
    }

    /// Payments within the filter window, inclusive on both boundary dates
    pub fn filtered_payments(&self, filter: &StatementFilter) -> Vec<Payment> {
        self.payments
            .iter()
            .filter(|p| filter.matches_customer(&p.customer_id))
            .filter(|p| p.date_naive().map(|d| filter.contains(&d)).unwrap_or(false))
            .cloned()
            .collect()
    }

    /// Build the complete statement for a filter window
    pub fn statement(&self, filter: &StatementFilter) -> Statement {
        let orders = self.filtered_orders(filter);
        let payments = self.filtered_payments(filter);
        let transactions = statement_transactions(&orders, &payments);
        let summary = summarize(&transactions);

        // An unknown customer id degrades to the all-customers label
        let customer_name = filter
            .customer_id
            .as_deref()
            .and_then(|id| self.customer(id))
            .map(|c| c.name.clone());

        Statement {
            filter: filter.clone(),
            customer_name,
            transactions,
            summary,
        }
    }

    /// Order history for one customer, most recent first
    pub fn customer_history(&self, customer_id: &str) -> Result<CustomerHistory, CoreError> {
        let customer = self
            .customer(customer_id)
            .cloned()
            .ok_or_else(|| CoreError::CustomerNotFound {
                id: customer_id.to_string(),
            })?;
        Ok(customer_history(customer, &self.orders))
    }

    /// Dashboard counters
    pub fn stats(&self) -> BooksStats {
        BooksStats {
            customer_count: self.customers.len(),
            order_count: self.orders.len(),
            payment_count: self.payments.len(),
            total_billed: self.orders.iter().map(|o| o.total_amount).sum(),
            total_received: self.payments.iter().map(|p| p.amount).sum(),
            total_outstanding: self.customers.iter().map(|c| c.pending_amount).sum(),
        }
    }

    // ==================== Mutations ====================

    /// Record a payment for a customer
    ///
    /// Applies the cached-totals rule in the same mutation: paid goes
    /// up by the amount, pending down by the same amount. Persists the
    /// full data set through the backend.
    pub async fn record_payment(
        &mut self,
        customer_id: &str,
        date: NaiveDate,
        amount: Decimal,
    ) -> Result<Payment, CoreError> {
        if amount <= Decimal::ZERO {
            return Err(CoreError::InvalidAmount {
                reason: "Payment amount must be positive".to_string(),
            });
        }

        let customer = self
            .customers
            .iter_mut()
            .find(|c| c.id == customer_id)
            .ok_or_else(|| CoreError::CustomerNotFound {
                id: customer_id.to_string(),
            })?;

        customer.paid_amount += amount;
        customer.pending_amount -= amount;

        let payment = Payment {
            id: next_id("pay", self.payments.iter().map(|p| p.id.as_str())),
            customer_id: customer.id.clone(),
            customer_name: customer.name.clone(),
            date: date.format("%Y-%m-%d").to_string(),
            amount,
        };
        self.payments.push(payment.clone());

        self.persist().await?;
        info!(
            "Recorded payment {} of {} for customer {}",
            payment.id, payment.amount, payment.customer_id
        );
        Ok(payment)
    }

    /// Record a new order for a customer
    ///
    /// The order total is computed from the line items; billed and
    /// pending on the customer move up by the total in the same
    /// mutation.
    pub async fn record_order(
        &mut self,
        customer_id: &str,
        date: NaiveDate,
        items: Vec<OrderItem>,
    ) -> Result<Order, CoreError> {
        if items.is_empty() {
            return Err(CoreError::InvalidAmount {
                reason: "Order must have at least one line item".to_string(),
            });
        }
        if items.iter().any(|i| i.price < Decimal::ZERO || i.quantity == 0) {
            return Err(CoreError::InvalidAmount {
                reason: "Line items need a non-negative price and a positive quantity".to_string(),
            });
        }

        let customer = self
            .customers
            .iter_mut()
            .find(|c| c.id == customer_id)
            .ok_or_else(|| CoreError::CustomerNotFound {
                id: customer_id.to_string(),
            })?;

        let total_amount: Decimal = items.iter().map(|i| i.line_total()).sum();
        customer.total_amount += total_amount;
        customer.pending_amount += total_amount;

        let order = Order {
            id: next_id("ord", self.orders.iter().map(|o| o.id.as_str())),
            customer_id: customer.id.clone(),
            customer_name: customer.name.clone(),
            date: date.format("%Y-%m-%d").to_string(),
            status: OrderStatus::Pending,
            items,
            total_amount,
        };
        self.orders.push(order.clone());

        self.persist().await?;
        info!(
            "Recorded order {} totalling {} for customer {}",
            order.id, order.total_amount, order.customer_id
        );
        Ok(order)
    }

    async fn persist(&self) -> Result<(), CoreError> {
        let data = VendorData {
            customers: self.customers.iter().map(Into::into).collect(),
            orders: self.orders.iter().map(Into::into).collect(),
            payments: self.payments.iter().map(Into::into).collect(),
        };
        self.backend.save(self.entry.clone(), &data).await?;
        Ok(())
    }
}

/// Generate the next sequential id with the given prefix
fn next_id<'a>(prefix: &str, existing: impl Iterator<Item = &'a str>) -> String {
    let max = existing
        .filter_map(|id| id.strip_prefix(prefix).and_then(|s| s.strip_prefix('-')))
        .filter_map(|s| s.parse::<u64>().ok())
        .max()
        .unwrap_or(0);
    format!("{}-{}", prefix, max + 1)
}

// ==================== Tests ====================
