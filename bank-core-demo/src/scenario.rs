use std::io::Write;

use bank_core_api::{Account, ApiResult, BankManager, FeeOutcome, MaintenanceReport};
use bank_core_model::utils::format_money;
use bank_core_model::{AdminUser, CheckingAccount, Introduce, SavingsAccount, User};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Scripted walk through the account model. Every step prints its outcome and the
/// script carries on regardless of individual failures.
pub fn run_banking<W: Write>(out: &mut W) -> anyhow::Result<()> {
    writeln!(out, "===== BANKING SYSTEM DEMO =====")?;

    let mut savings = SavingsAccount::open("Alice Johnson", "1234567890", dec!(1000), dec!(2.5))?;
    let mut checking = CheckingAccount::open("Bob Smith", "0987654321", dec!(500), dec!(200))?;

    section(out, "Initial Setup")?;
    writeln!(out, "{}", savings.summary())?;
    writeln!(out, "{}", checking.summary())?;

    section(out, "Transactions")?;
    print_balance(out, "Deposit $500.00 into savings", savings.deposit(dec!(500)))?;
    print_balance(
        out,
        "Check to Electric Company for $150.00",
        checking.write_check("Electric Company", dec!(150)),
    )?;

    section(out, "Transfer Between Accounts")?;
    let amount = dec!(300);
    writeln!(
        out,
        "Transferring {} from {} to {}",
        format_money(amount),
        savings.holder_name(),
        checking.holder_name()
    )?;
    match BankManager::transfer(&mut savings, &mut checking, amount) {
        Ok(()) => writeln!(out, "Transfer complete")?,
        Err(e) => writeln!(out, "Transfer failed: {e}")?,
    }

    section(out, "Withdrawal Limit Test (Savings)")?;
    for attempt in 1..=7 {
        print_balance(
            out,
            &format!("Withdrawal attempt {attempt}"),
            savings.withdraw(dec!(50)),
        )?;
    }

    section(out, "Overdraft Test (Checking)")?;
    print_balance(out, "Withdraw $600.00 from checking", checking.withdraw(dec!(600)))?;

    print_maintenance(out, BankManager::process_monthly_maintenance(&mut savings))?;
    print_maintenance(out, BankManager::process_monthly_maintenance(&mut checking))?;

    section(out, "Transaction History")?;
    writeln!(
        out,
        "{}'s transactions: {} transactions",
        savings.holder_name(),
        savings.history().len()
    )?;
    for tx in savings.history() {
        writeln!(out, "  {tx}")?;
    }

    Ok(())
}

/// Polymorphic introductions of a plain user and an admin
pub fn run_users<W: Write>(out: &mut W) -> anyhow::Result<()> {
    section(out, "Users")?;

    let mut user = User::new("Alex", 25)?;
    let admin = AdminUser::new("Sam", 30, ["manage-users", "edit-content"])?;

    let people: [&dyn Introduce; 2] = [&user, &admin];
    for person in people {
        writeln!(out, "{}", person.introduction())?;
    }

    user.set_age(26)?;
    writeln!(out, "{} is now {}", user.name(), user.age())?;
    if let Err(e) = user.set_age(0) {
        writeln!(out, "Rejected age update: {e}")?;
    }

    Ok(())
}

fn section<W: Write>(out: &mut W, title: &str) -> std::io::Result<()> {
    writeln!(out)?;
    writeln!(out, "--- {title} ---")
}

fn print_balance<W: Write>(out: &mut W, label: &str, result: ApiResult<Decimal>) -> std::io::Result<()> {
    match result {
        Ok(balance) => writeln!(out, "{label}: ok, new balance {}", format_money(balance)),
        Err(e) => writeln!(out, "{label}: failed, {e}"),
    }
}

fn print_maintenance<W: Write>(out: &mut W, report: MaintenanceReport) -> std::io::Result<()> {
    section(out, &format!("Monthly maintenance for {}", report.holder))?;
    match &report.fee {
        FeeOutcome::Charged(fee) => writeln!(out, "Monthly fee charged: {}", format_money(*fee))?,
        FeeOutcome::Waived => writeln!(out, "Monthly fee waived")?,
        FeeOutcome::Failed(e) => writeln!(out, "Monthly fee could not be charged: {e}")?,
    }
    if let Some(interest) = report.interest {
        writeln!(out, "Interest applied: {}", format_money(interest))?;
    }
    writeln!(out, "{}", report.summary)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn banking_output() -> String {
        let mut buf = Vec::new();
        run_banking(&mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_banking_script_outcomes() {
        let output = banking_output();

        assert!(output.contains("Account: ****7890 | Holder: Alice Johnson | Balance: $1000.00"));
        assert!(output.contains("Account: ****4321 | Holder: Bob Smith | Balance: $500.00"));
        assert!(output.contains("Deposit $500.00 into savings: ok, new balance $1500.00"));
        assert!(output.contains("Check to Electric Company for $150.00: ok, new balance $350.00"));
        assert!(output.contains("Transfer complete"));
        // the transfer already used one of the six withdrawals
        assert!(output.contains("Withdrawal attempt 5: ok, new balance $950.00"));
        assert!(output.contains("Withdrawal attempt 6: failed, Withdrawal limit reached (6 per period)"));
        assert!(output.contains("Withdrawal attempt 7: failed"));
        assert!(output.contains("Withdraw $600.00 from checking: ok, new balance $50.00"));
    }

    #[test]
    fn test_banking_script_maintenance() {
        let output = banking_output();

        assert!(output.contains("--- Monthly maintenance for Alice Johnson ---"));
        assert!(output.contains("Monthly fee waived"));
        assert!(output.contains("Interest applied: $1.98"));
        assert!(output.contains("--- Monthly maintenance for Bob Smith ---"));
        assert!(output.contains("Monthly fee charged: $10.00"));
        assert!(output.contains("Account: ****4321 | Holder: Bob Smith | Balance: $40.00"));
        // initial, deposit, transfer-out, five withdrawals, interest
        assert!(output.contains("Alice Johnson's transactions: 9 transactions"));
    }

    #[test]
    fn test_users_script() {
        let mut buf = Vec::new();
        run_users(&mut buf).unwrap();
        let output = String::from_utf8(buf).unwrap();

        assert!(output.contains("Hi, I'm Alex and I'm 25 years old."));
        assert!(output.contains("Hi, I'm Admin Sam with privileges: manage-users, edit-content."));
        assert!(output.contains("Alex is now 26"));
        assert!(output.contains("Rejected age update"));
    }
}
