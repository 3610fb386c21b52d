use crate::context::Context;
use crate::error::Result;
use crate::operations::list_lines;
use crate::projects::ProjectConfig;

pub fn handle_list(projects: &ProjectConfig, ctx: &Context) -> Result<()> {
    for line in list_lines(projects, ctx.verbose)? {
        ctx.reporter.info(&line);
    }
    Ok(())
}
