use core::str::FromStr;

/// Where the session is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Login,
    Menu,
    Investments,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    Balance,
    Deposit,
    Withdraw,
    Transfer,
    Statement,
    Investments,
    Dispenser,
    Logout,
}

impl MenuChoice {
    pub const ALL: [MenuChoice; 8] = [
        MenuChoice::Balance,
        MenuChoice::Deposit,
        MenuChoice::Withdraw,
        MenuChoice::Transfer,
        MenuChoice::Statement,
        MenuChoice::Investments,
        MenuChoice::Dispenser,
        MenuChoice::Logout,
    ];

    pub fn key(self) -> &'static str {
        match self {
            MenuChoice::Balance => "1",
            MenuChoice::Deposit => "2",
            MenuChoice::Withdraw => "3",
            MenuChoice::Transfer => "4",
            MenuChoice::Statement => "5",
            MenuChoice::Investments => "6",
            MenuChoice::Dispenser => "7",
            MenuChoice::Logout => "0",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            MenuChoice::Balance => "Balance",
            MenuChoice::Deposit => "Deposit",
            MenuChoice::Withdraw => "Withdraw",
            MenuChoice::Transfer => "Transfer",
            MenuChoice::Statement => "Statement",
            MenuChoice::Investments => "Investments",
            MenuChoice::Dispenser => "Cash dispenser",
            MenuChoice::Logout => "Logout",
        }
    }
}

impl FromStr for MenuChoice {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        MenuChoice::ALL.into_iter().find(|c| c.key() == s.trim()).ok_or(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvestmentChoice {
    Apply,
    Redeem,
    Positions,
    Back,
}

impl InvestmentChoice {
    pub const ALL: [InvestmentChoice; 4] = [
        InvestmentChoice::Apply,
        InvestmentChoice::Redeem,
        InvestmentChoice::Positions,
        InvestmentChoice::Back,
    ];

    pub fn key(self) -> &'static str {
        match self {
            InvestmentChoice::Apply => "1",
            InvestmentChoice::Redeem => "2",
            InvestmentChoice::Positions => "3",
            InvestmentChoice::Back => "0",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            InvestmentChoice::Apply => "Apply",
            InvestmentChoice::Redeem => "Redeem",
            InvestmentChoice::Positions => "Positions",
            InvestmentChoice::Back => "Back",
        }
    }
}

impl FromStr for InvestmentChoice {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        InvestmentChoice::ALL
            .into_iter()
            .find(|c| c.key() == s.trim())
            .ok_or(())
    }
}

/// Numbered option list, one per line.
pub fn render_options<'a>(options: impl IntoIterator<Item = (&'a str, &'a str)>) -> String {
    options
        .into_iter()
        .map(|(key, label)| format!("{key}) {label}"))
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn choices_parse_from_their_keys() {
        for choice in MenuChoice::ALL {
            assert_eq!(choice.key().parse::<MenuChoice>(), Ok(choice));
        }
        assert!("9".parse::<MenuChoice>().is_err());
        assert_eq!(" 3 ".parse::<InvestmentChoice>(), Ok(InvestmentChoice::Positions));
    }

    #[test]
    fn options_render_one_per_line() {
        let text = render_options(InvestmentChoice::ALL.map(|c| (c.key(), c.label())));
        assert_eq!(text, "1) Apply\n2) Redeem\n3) Positions\n0) Back");
    }
}
