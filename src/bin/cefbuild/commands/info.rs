//! `cefbuild info` command
//!
//! Reports the resolved platform facts, the CEF version from the local
//! header (when present), the artifact paths the pipeline would use, and
//! which external tools are reachable. Purely read-only.

use anyhow::Result;

use cefbuild::core::layout::{
    distribution_directory, locate_upstream_binaries, locate_wrapper_binary, WrapperBinary,
};
use cefbuild::util::process::find_executable;
use cefbuild::util::ProjectContext;
use cefbuild::{LibraryVersion, PlatformDescriptor};

pub fn execute() -> Result<()> {
    let ctx = ProjectContext::current()?;
    let desc = PlatformDescriptor::resolve();

    println!("platform:");
    println!("  os family:        {}", desc.os);
    println!("  pointer width:    {}", desc.pointer.bits());
    println!("  local postfix:    {}", desc.local_postfix_arch());
    println!("  upstream postfix: {}", desc.upstream_postfix_arch());
    println!("  module extension: {}", desc.module_ext());

    let header = ctx.version_header(&desc);
    println!("version header:     {}", header.display());
    match LibraryVersion::from_header(&header) {
        Ok(version) => {
            println!("  CEF version:      {}", version.cef);
            println!("  Chromium major:   {}", version.chrome_major);

            let build_root = ctx.build_dir();
            match locate_upstream_binaries(&build_root, &desc, &version) {
                Ok(loc) => println!("upstream binaries:  {}", loc.path.display()),
                Err(err) => println!("upstream binaries:  {err}"),
            }
            match locate_wrapper_binary(&build_root, &desc, &version.ident()) {
                WrapperBinary::Found(loc) => {
                    println!("wrapper binary:     {}", loc.path.display())
                }
                WrapperBinary::NotBuilt => println!("wrapper binary:     (not built)"),
            }
            let distrib = distribution_directory(&build_root, &desc, &version.ident());
            println!("distribution dir:   {}", distrib.display());
        }
        Err(err) => println!("  (unavailable: {err})"),
    }

    println!("tools:");
    for tool in ["git", "python", "cmake", "ninja"] {
        match find_executable(tool) {
            Some(path) => println!("  {:<8} {}", tool, path.display()),
            None => println!("  {:<8} (not found)", tool),
        }
    }

    Ok(())
}
