//! Cost-of-capital schedule for a purchase financed over monthly instalments.

use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum CapitalError {
    #[error("o valor financiado deve ser maior que zero")]
    NonPositivePrincipal,
    #[error("o período deve ter pelo menos um mês")]
    ZeroMonths,
    #[error("a taxa Selic não pode ser negativa")]
    NegativeRate,
}

/// One month of the schedule.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct InterestStep {
    pub month: u32,
    /// Balance still financed at the start of the month.
    pub outstanding_balance: f64,
    /// Interest accrued on that balance this month.
    pub monthly_interest: f64,
    pub cumulative_interest: f64,
}

/// Month-by-month interest on a declining balance.
///
/// The balance starts at the full principal and shrinks by one equal
/// instalment per month; interest compounds at the twelfth root of the
/// annual rate.
#[derive(Clone, Debug)]
pub struct InterestSchedule {
    monthly_rate: f64,
    instalment: f64,
    outstanding_balance: f64,
    cumulative_interest: f64,
    month: u32,
    total_months: u32,
}

impl InterestSchedule {
    pub fn new(
        principal: f64,
        annual_rate: f64,
        total_months: u32,
    ) -> Result<Self, CapitalError> {
        if !(principal > 0.0) {
            return Err(CapitalError::NonPositivePrincipal);
        }
        if total_months == 0 {
            return Err(CapitalError::ZeroMonths);
        }
        if annual_rate < 0.0 {
            return Err(CapitalError::NegativeRate);
        }

        Ok(Self {
            monthly_rate: (1.0 + annual_rate).powf(1.0 / 12.0) - 1.0,
            instalment: principal / total_months as f64,
            outstanding_balance: principal,
            cumulative_interest: 0.0,
            month: 0,
            total_months,
        })
    }
}

impl Iterator for InterestSchedule {
    type Item = InterestStep;

    fn next(&mut self) -> Option<InterestStep> {
        if self.month >= self.total_months {
            return None;
        }
        self.month += 1;

        let monthly_interest = self.outstanding_balance * self.monthly_rate;
        self.cumulative_interest += monthly_interest;

        let step = InterestStep {
            month: self.month,
            outstanding_balance: self.outstanding_balance,
            monthly_interest,
            cumulative_interest: self.cumulative_interest,
        };

        self.outstanding_balance -= self.instalment;
        Some(step)
    }
}

/// Smallest interest rate (in percent points) that covers the capital cost of
/// financing `principal` over `total_months` at the given SELIC rate.
pub fn minimum_acceptable_interest(
    principal: f64,
    annual_rate: f64,
    total_months: u32,
) -> Result<f64, CapitalError> {
    let total_interest = InterestSchedule::new(principal, annual_rate, total_months)?
        .last()
        .map(|step| step.cumulative_interest)
        .unwrap_or(0.0);
    Ok(total_interest / principal * 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn schedule_runs_for_the_requested_months() {
        let steps: Vec<_> = InterestSchedule::new(1000.0, 0.15, 12).unwrap().collect();
        assert_eq!(steps.len(), 12);
        assert_eq!(steps.first().unwrap().month, 1);
        assert_eq!(steps.last().unwrap().month, 12);
    }

    #[test]
    fn first_month_charges_interest_on_the_full_principal() {
        let first = InterestSchedule::new(1000.0, 0.15, 12)
            .unwrap()
            .next()
            .unwrap();
        let monthly_rate = 1.15_f64.powf(1.0 / 12.0) - 1.0;
        assert_eq!(first.outstanding_balance, 1000.0);
        assert!((first.monthly_interest - 1000.0 * monthly_rate).abs() < 1e-9);
        assert_eq!(first.cumulative_interest, first.monthly_interest);
    }

    #[test]
    fn last_month_holds_one_instalment() {
        let last = InterestSchedule::new(1200.0, 0.15, 12).unwrap().last().unwrap();
        assert!((last.outstanding_balance - 100.0).abs() < 1e-9);
        assert!(last.cumulative_interest > 0.0);
    }

    #[test]
    fn zero_rate_accrues_nothing() {
        let steps: Vec<_> = InterestSchedule::new(1000.0, 0.0, 12).unwrap().collect();
        assert!(steps.iter().all(|s| s.monthly_interest == 0.0));
        assert!(steps.iter().all(|s| s.cumulative_interest == 0.0));
    }

    #[test]
    fn cumulative_interest_is_monotone() {
        let steps: Vec<_> = InterestSchedule::new(5000.0, 0.12, 24).unwrap().collect();
        for pair in steps.windows(2) {
            assert!(pair[1].cumulative_interest >= pair[0].cumulative_interest);
        }
    }

    #[test]
    fn minimum_interest_covers_the_schedule_total() {
        let floor = minimum_acceptable_interest(1000.0, 0.15, 12).unwrap();
        let total = InterestSchedule::new(1000.0, 0.15, 12)
            .unwrap()
            .last()
            .unwrap()
            .cumulative_interest;
        assert!((floor - total / 1000.0 * 100.0).abs() < 1e-9);
        assert!(floor > 0.0);
    }

    #[test]
    fn minimum_interest_is_zero_for_a_zero_rate() {
        assert_eq!(minimum_acceptable_interest(1000.0, 0.0, 12).unwrap(), 0.0);
    }

    #[test]
    fn rejects_invalid_inputs() {
        assert_eq!(
            InterestSchedule::new(0.0, 0.15, 12).err(),
            Some(CapitalError::NonPositivePrincipal)
        );
        assert_eq!(
            InterestSchedule::new(-1000.0, 0.15, 12).err(),
            Some(CapitalError::NonPositivePrincipal)
        );
        assert_eq!(
            InterestSchedule::new(1000.0, 0.15, 0).err(),
            Some(CapitalError::ZeroMonths)
        );
        assert_eq!(
            InterestSchedule::new(1000.0, -0.15, 12).err(),
            Some(CapitalError::NegativeRate)
        );
    }
}
