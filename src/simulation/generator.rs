//! Random Sample Generator
//!
//! Draws synthetic logistics quantities from the configured ranges.
//! The random source is owned by the generator, so a seeded generator
//! yields the same sequence of samples on every run.

use crate::config::{ClassicRanges, DerivedRanges, IntRange, RateRange, SampleProfile};
use crate::simulation::sample::Sample;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::debug;

/// Generator of synthetic samples over an explicit random source
pub struct SampleGenerator<R: Rng> {
    /// Ranges to draw from
    profile: SampleProfile,
    /// Number of supplier deliveries per sample
    supplier_deliveries: usize,
    /// Bernoulli probability of an on-time supplier delivery
    supplier_on_time_probability: f64,
    /// Random source
    rng: R,
}

impl<R: Rng> SampleGenerator<R> {
    /// Create a generator over an existing random source
    pub fn new(
        profile: SampleProfile,
        supplier_deliveries: usize,
        supplier_on_time_probability: f64,
        rng: R,
    ) -> Self {
        Self {
            profile,
            supplier_deliveries,
            supplier_on_time_probability,
            rng,
        }
    }

    /// Draw one sample
    pub fn generate(&mut self) -> Sample {
        let sample = match self.profile.clone() {
            SampleProfile::Classic(ranges) => self.generate_classic(&ranges),
            SampleProfile::Derived(ranges) => self.generate_derived(&ranges),
        };
        debug!(
            "Generated {} sample: {} orders, {} t",
            self.profile.name(),
            sample.orders,
            sample.total_tonnage
        );
        sample
    }

    fn generate_classic(&mut self, r: &ClassicRanges) -> Sample {
        Sample {
            orders: self.draw(r.orders),
            orders_on_time: self.draw(r.orders_on_time),
            avg_inventory: self.draw(r.avg_inventory),
            net_sales: self.draw(r.net_sales),
            cost_of_goods_sold: self.draw(r.cost_of_goods_sold),
            perfect_orders: self.draw(r.perfect_orders),
            total_transport_cost: self.draw(r.total_transport_cost),
            total_tonnage: self.draw(r.total_tonnage),
            supplier_on_time_flags: self.supplier_flags(),
        }
    }

    fn generate_derived(&mut self, r: &DerivedRanges) -> Sample {
        let orders = self.draw(r.orders);
        let on_time_rate = self.draw_rate(r.on_time_rate);
        let perfect_rate = self.draw_rate(r.perfect_rate);

        let net_sales = self.draw(r.net_sales);
        let gross_margin = self.draw_rate(r.gross_margin);
        let cost_of_goods_sold = (net_sales as f64 * (1.0 - gross_margin)).round() as u64;

        let turnover = self.draw_rate(r.inventory_turnover);
        let avg_inventory = (cost_of_goods_sold as f64 / turnover).round() as u64;

        let total_tonnage = self.draw(r.total_tonnage);
        let cost_per_ton = self.draw_rate(r.cost_per_ton);

        Sample {
            orders,
            orders_on_time: (orders as f64 * on_time_rate).round() as u64,
            avg_inventory,
            net_sales,
            cost_of_goods_sold,
            perfect_orders: (orders as f64 * perfect_rate).round() as u64,
            total_transport_cost: (total_tonnage as f64 * cost_per_ton).round() as u64,
            total_tonnage,
            supplier_on_time_flags: self.supplier_flags(),
        }
    }

    fn draw(&mut self, range: IntRange) -> u64 {
        self.rng.gen_range(range.min..=range.max)
    }

    fn draw_rate(&mut self, range: RateRange) -> f64 {
        self.rng.gen_range(range.min..=range.max)
    }

    fn supplier_flags(&mut self) -> Vec<bool> {
        let p = self.supplier_on_time_probability;
        (0..self.supplier_deliveries)
            .map(|_| self.rng.gen_bool(p))
            .collect()
    }
}

impl SampleGenerator<StdRng> {
    /// Deterministic generator for a fixed seed
    pub fn seeded(
        profile: SampleProfile,
        supplier_deliveries: usize,
        supplier_on_time_probability: f64,
        seed: u64,
    ) -> Self {
        Self::new(
            profile,
            supplier_deliveries,
            supplier_on_time_probability,
            StdRng::seed_from_u64(seed),
        )
    }

    /// Generator seeded from OS entropy
    pub fn from_entropy(
        profile: SampleProfile,
        supplier_deliveries: usize,
        supplier_on_time_probability: f64,
    ) -> Self {
        Self::new(
            profile,
            supplier_deliveries,
            supplier_on_time_probability,
            StdRng::from_entropy(),
        )
    }
}
