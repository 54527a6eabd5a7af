/// Namespace a contacts file belongs to
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Owner {
    User(String),
    Admin(String),
}

impl Owner {
    pub fn username(&self) -> &str {
        match self {
            Owner::User(username) | Owner::Admin(username) => username,
        }
    }

    pub fn is_admin(&self) -> bool {
        matches!(self, Owner::Admin(_))
    }

    /// Users manage their own groups, admins share one set
    pub fn group_scope(&self) -> GroupScope {
        match self {
            Owner::User(username) => GroupScope::User(username.clone()),
            Owner::Admin(_) => GroupScope::Shared,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GroupScope {
    User(String),
    Shared,
}
