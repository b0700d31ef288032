use git_refresh::askpass::Request;

fn main() -> anyhow::Result<()> {
    let prompt = std::env::args().nth(1).unwrap_or_default();
    let request = Request::from_prompt(&prompt);

    let value = std::env::var(request.env_var())
        .map_err(|_| anyhow::anyhow!("{} is not set", request.env_var()))?;
    println!("{}", value);

    Ok(())
}
