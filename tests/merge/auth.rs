use kisuite::{SuiteContext, SuiteDecl, host::GroupTree};

use crate::SUITES;

#[linkme::distributed_slice(SUITES)]
static LOGIN: SuiteDecl<GroupTree> = SuiteDecl::new("app/auth/login", login);

#[linkme::distributed_slice(SUITES)]
static LOGOUT: SuiteDecl<GroupTree> = SuiteDecl::new("app/auth/logout", logout);

fn check_password(password: &str) -> Result<(), String> {
    match password.is_empty() {
        true => Err("empty password".into()),
        false => Ok(()),
    }
}

fn login(ctx: &mut SuiteContext<'_, GroupTree>) {
    let host = ctx.host();
    host.it("accepts valid password", || check_password("hunter2"));
    host.it("rejects empty password", || {
        assert!(check_password("").is_err());
    });
}

fn logout(ctx: &mut SuiteContext<'_, GroupTree>) {
    ctx.host().it("clears session", || {
        let mut session = Some("token");
        session.take();
        assert!(session.is_none());
    });
}
