//! The interactive session: login, main menu, investment menu.
//!
//! Each screen handler returns the next screen, or `None` when the user
//! quits. Ledger errors are printed as `Error: <message>` and the session
//! carries on.

use std::fmt::Display;
use std::io::{self, BufRead, Write};
use std::ops::ControlFlow;

use tsbank_core::{AccountName, Amount, Clock, Decimal, DomainResult, display_amount};
use tsbank_ledger::{DispenserKind, InvestmentKind, LedgerService, TransferKind};

use crate::prompt::{Prompt, parse_amount};
use crate::screens::{InvestmentChoice, MenuChoice, Screen, render_options};

type Step = io::Result<ControlFlow<()>>;

const GO_ON: Step = Ok(ControlFlow::Continue(()));
const QUIT: Step = Ok(ControlFlow::Break(()));

pub struct Session<R, W> {
    ledger: LedgerService,
    clock: Box<dyn Clock>,
    prompt: Prompt<R, W>,
    account: Option<AccountName>,
    screen: Screen,
}

impl<R: BufRead, W: Write> Session<R, W> {
    pub fn new(ledger: LedgerService, clock: Box<dyn Clock>, input: R, output: W) -> Self {
        Self {
            ledger,
            clock,
            prompt: Prompt::new(input, output),
            account: None,
            screen: Screen::Login,
        }
    }

    /// Start already logged in, skipping the login screen. Fails for an
    /// unknown account.
    pub fn logged_in(mut self, account: &str) -> DomainResult<Self> {
        let name: AccountName = account.parse()?;
        self.ledger.balance(name.as_str())?;
        self.account = Some(name);
        self.screen = Screen::Menu;
        Ok(self)
    }

    pub fn ledger(&self) -> &LedgerService {
        &self.ledger
    }

    pub fn screen(&self) -> Screen {
        self.screen
    }

    pub fn into_output(self) -> W {
        self.prompt.into_output()
    }

    /// Drive screens until the user quits or input ends.
    pub fn run(&mut self) -> io::Result<()> {
        loop {
            let next = match self.screen {
                Screen::Login => self.login()?,
                Screen::Menu => self.menu()?,
                Screen::Investments => self.investments()?,
            };
            match next {
                Some(screen) => self.screen = screen,
                None => break,
            }
        }
        tracing::debug!("session ended");
        self.prompt.say("Goodbye.")
    }

    fn login(&mut self) -> io::Result<Option<Screen>> {
        let Some(answer) = self.prompt.ask("Account: ")? else {
            return Ok(None);
        };
        match answer.parse::<AccountName>() {
            Ok(name) if self.ledger.is_known_account(name.as_str()) => {
                self.prompt.say(format!("Welcome, {name}."))?;
                self.account = Some(name);
                Ok(Some(Screen::Menu))
            }
            _ => {
                self.prompt.say("invalid account")?;
                Ok(Some(Screen::Login))
            }
        }
    }

    fn menu(&mut self) -> io::Result<Option<Screen>> {
        let Some(account) = self.account.clone() else {
            return Ok(Some(Screen::Login));
        };
        self.prompt.say(format!("\n== {account} =="))?;
        self.prompt
            .say(render_options(MenuChoice::ALL.map(|c| (c.key(), c.label()))))?;

        let Some(answer) = self.prompt.ask("> ")? else {
            return Ok(None);
        };
        let Ok(choice) = answer.parse::<MenuChoice>() else {
            self.prompt.say("invalid option")?;
            return Ok(Some(Screen::Menu));
        };

        let account = account.as_str();
        let step = match choice {
            MenuChoice::Balance => {
                let result = self.ledger.balance(account);
                self.report(result, |balance| format!("Balance: {}", display_amount(balance)))
            }
            MenuChoice::Deposit => self.deposit(account),
            MenuChoice::Withdraw => self.withdraw(account),
            MenuChoice::Transfer => self.transfer(account),
            MenuChoice::Statement => self.statement(account),
            MenuChoice::Dispenser => self.dispenser(account),
            MenuChoice::Investments => return Ok(Some(Screen::Investments)),
            MenuChoice::Logout => {
                self.prompt.say(format!("Logged out of {account}."))?;
                self.account = None;
                return Ok(Some(Screen::Login));
            }
        };
        Ok(match step? {
            ControlFlow::Continue(()) => Some(Screen::Menu),
            ControlFlow::Break(()) => None,
        })
    }

    fn investments(&mut self) -> io::Result<Option<Screen>> {
        let Some(account) = self.account.clone() else {
            return Ok(Some(Screen::Login));
        };
        self.prompt.say("\n== Investments ==")?;
        self.prompt
            .say(render_options(InvestmentChoice::ALL.map(|c| (c.key(), c.label()))))?;

        let Some(answer) = self.prompt.ask("> ")? else {
            return Ok(None);
        };
        let Ok(choice) = answer.parse::<InvestmentChoice>() else {
            self.prompt.say("invalid option")?;
            return Ok(Some(Screen::Investments));
        };

        let step = match choice {
            InvestmentChoice::Apply => self.apply_investment(account.as_str()),
            InvestmentChoice::Redeem => self.redeem_investment(account.as_str()),
            InvestmentChoice::Positions => self.positions(),
            InvestmentChoice::Back => return Ok(Some(Screen::Menu)),
        };
        Ok(match step? {
            ControlFlow::Continue(()) => Some(Screen::Investments),
            ControlFlow::Break(()) => None,
        })
    }

    fn deposit(&mut self, account: &str) -> Step {
        let Some(amount) = self.ask_amount()? else {
            return QUIT;
        };
        let Some(amount) = amount else {
            return GO_ON;
        };
        let result = self.ledger.deposit(amount, account);
        self.report(result, |balance| {
            format!("Deposit completed. New balance: {}", display_amount(balance))
        })
    }

    fn withdraw(&mut self, account: &str) -> Step {
        let Some(amount) = self.ask_amount()? else {
            return QUIT;
        };
        let Some(amount) = amount else {
            return GO_ON;
        };
        let result = self.ledger.withdraw(amount, account);
        self.report(result, |balance| {
            format!("Withdrawal completed. New balance: {}", display_amount(balance))
        })
    }

    fn transfer(&mut self, account: &str) -> Step {
        let Some(destination) = self.prompt.ask("Destination account: ")? else {
            return QUIT;
        };
        let Some(kind) = self.ask_kind::<TransferKind>("Kind (PIX, DOC, TED, INTERNA): ")? else {
            return QUIT;
        };
        let Some(kind) = kind else {
            return GO_ON;
        };
        let Some(amount) = self.ask_amount()? else {
            return QUIT;
        };
        let Some(amount) = amount else {
            return GO_ON;
        };

        let now = self.clock.now();
        let result = self
            .ledger
            .transfer_with_policy(kind, amount, account, &destination, now);
        self.report(result, |receipt| {
            format!(
                "{kind} of {} to {} completed. New balance: {}",
                display_amount(receipt.amount),
                receipt.to,
                display_amount(receipt.source_balance)
            )
        })
    }

    fn statement(&mut self, account: &str) -> Step {
        let entries = match self.ledger.statement(account) {
            Ok(entries) => entries,
            Err(err) => return self.report::<()>(Err(err), |_| String::new()),
        };
        if entries.is_empty() {
            self.prompt.say("No entries.")?;
            return GO_ON;
        }
        for entry in &entries {
            self.prompt
                .say(format!("{}: {}", entry.operation, display_amount(entry.amount)))?;
        }

        let Some(answer) = self.prompt.ask("Clear statement? (y/N): ")? else {
            return QUIT;
        };
        if answer.eq_ignore_ascii_case("y") {
            let result = self.ledger.clear_statement(account);
            return self.report(result, |()| "Statement cleared.".to_owned());
        }
        GO_ON
    }

    fn dispenser(&mut self, account: &str) -> Step {
        let Some(kind) =
            self.ask_kind::<DispenserKind>("Dispenser (CAIXA_10, CAIXA_20, CAIXA_50, CAIXA_100): ")?
        else {
            return QUIT;
        };
        let Some(kind) = kind else {
            return GO_ON;
        };
        let Some(amount) = self.ask_amount()? else {
            return QUIT;
        };
        let Some(amount) = amount else {
            return GO_ON;
        };
        let result = self.ledger.withdraw_at_dispenser(amount, kind, account);
        self.report(result, |balance| {
            format!(
                "Take your {} notes. New balance: {}",
                kind.denomination(),
                display_amount(balance)
            )
        })
    }

    fn apply_investment(&mut self, account: &str) -> Step {
        let Some(kind) = self.ask_kind::<InvestmentKind>("Kind (CDB, POUPANCA, TESOURO_DIRETO): ")? else {
            return QUIT;
        };
        let Some(kind) = kind else {
            return GO_ON;
        };
        let Some(amount) = self.ask_amount()? else {
            return QUIT;
        };
        let Some(amount) = amount else {
            return GO_ON;
        };
        let now = self.clock.now();
        let result = self.ledger.apply_investment(amount, kind, account, now);
        self.report(result, |receipt| {
            format!(
                "Applied in {}. Invested: {}",
                receipt.kind,
                display_amount(receipt.principal)
            )
        })
    }

    fn redeem_investment(&mut self, account: &str) -> Step {
        let Some(kind) = self.ask_kind::<InvestmentKind>("Kind (CDB, POUPANCA, TESOURO_DIRETO): ")? else {
            return QUIT;
        };
        let Some(kind) = kind else {
            return GO_ON;
        };
        let now = self.clock.now();
        let result = self.ledger.redeem_investment(kind, account, now);
        self.report(result, |redemption| {
            format!(
                "Redeemed {} from {} ({} days, yield {}).",
                display_amount(redemption.total),
                redemption.kind,
                redemption.days,
                display_amount(redemption.yield_amount)
            )
        })
    }

    fn positions(&mut self) -> Step {
        for position in self.ledger.investment_positions() {
            let opened = position
                .opened_at
                .map(|at| at.format("%Y-%m-%d %H:%M").to_string())
                .unwrap_or_else(|| "-".to_owned());
            self.prompt.say(format!(
                "{}: {} at {:.1}% (opened {opened})",
                position.kind,
                display_amount(position.principal),
                position.rate * Decimal::ONE_HUNDRED
            ))?;
        }
        GO_ON
    }

    /// `None` when the user quit; `Some(None)` when the typed amount was
    /// rejected locally.
    fn ask_amount(&mut self) -> io::Result<Option<Option<Amount>>> {
        let Some(raw) = self.prompt.ask("Amount: ")? else {
            return Ok(None);
        };
        match parse_amount(&raw) {
            Ok(amount) => Ok(Some(Some(amount))),
            Err(err) => {
                self.prompt.say(err)?;
                Ok(Some(None))
            }
        }
    }

    fn ask_kind<K>(&mut self, label: &str) -> io::Result<Option<Option<K>>>
    where
        K: core::str::FromStr,
        K::Err: Display,
    {
        let Some(raw) = self.prompt.ask(label)? else {
            return Ok(None);
        };
        match raw.parse::<K>() {
            Ok(kind) => Ok(Some(Some(kind))),
            Err(err) => {
                self.prompt.say(format!("Error: {err}"))?;
                Ok(Some(None))
            }
        }
    }

    fn report<T>(&mut self, result: DomainResult<T>, success: impl FnOnce(T) -> String) -> Step {
        match result {
            Ok(value) => self.prompt.say(success(value))?,
            Err(err) => self.prompt.say(format!("Error: {}", err.message()))?,
        }
        GO_ON
    }
}
