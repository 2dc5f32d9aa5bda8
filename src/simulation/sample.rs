//! Raw logistics quantities for one run

use serde::{Deserialize, Serialize};

/// One synthetic draw of logistics quantities
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sample {
    /// Orders placed
    pub orders: u64,
    /// Orders delivered on time
    pub orders_on_time: u64,
    /// Average inventory value
    pub avg_inventory: u64,
    /// Net sales
    pub net_sales: u64,
    /// Cost of goods sold
    pub cost_of_goods_sold: u64,
    /// Orders delivered complete, on time and undamaged
    pub perfect_orders: u64,
    /// Transport spend over the period
    pub total_transport_cost: u64,
    /// Tonnage shipped over the period
    pub total_tonnage: u64,
    /// One flag per supplier delivery, true when it arrived on time
    pub supplier_on_time_flags: Vec<bool>,
}

impl Sample {
    /// Supplier deliveries that arrived on time
    pub fn supplier_on_time_count(&self) -> usize {
        self.supplier_on_time_flags.iter().filter(|&&f| f).count()
    }

    pub fn supplier_deliveries(&self) -> usize {
        self.supplier_on_time_flags.len()
    }
}
