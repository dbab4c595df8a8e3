//! Core business logic: conversion, costing, price history, sales analytics

pub mod config;
pub mod cost;
pub mod currency;
pub mod error;
pub mod history;
pub mod log;
pub mod region;
pub mod sales;

// Re-export main types for cleaner imports
pub use cost::{QuickReference, WeightUnit, compute_cost, quick_reference};
pub use currency::{Currency, CurrencyConverter};
pub use error::CoreError;
pub use history::{PriceBand, PricePoint, PriceSeries, PriceStats, statistics};
pub use region::{Region, RegionMap};
pub use sales::{MonthlyPurchase, SalesAggregator, SalesRow, StateRecord};
