// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 kf-components contributors

//! Package command - show the descriptor and check what it bundles

use colored::Colorize;
use miette::Result;
use std::path::PathBuf;

use crate::operator::OperatorRegistry;
use crate::package::PackageDescriptor;
use crate::utils::{
    print_bullet, print_error, print_header, print_info, print_section, print_success,
    print_warning,
};

/// Run the package command
pub async fn run(descriptor_path: Option<PathBuf>, verbose: bool) -> Result<()> {
    let descriptor = match &descriptor_path {
        Some(path) => PackageDescriptor::from_file(path)?,
        None => PackageDescriptor::builtin(),
    };
    let registry = OperatorRegistry::builtin()?;

    let base_dir = match descriptor_path.as_ref().and_then(|p| p.parent()) {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => std::env::current_dir()
            .map_err(|e| miette::miette!("Failed to get current directory: {}", e))?,
    };

    print_header(&format!("{} {}", descriptor.name, descriptor.version));

    print_section("Entry points");
    let mut has_errors = false;
    for (command, operator) in &descriptor.entry_points {
        match registry.resolve(operator) {
            Ok(_) => print_success(&format!("{} -> {}", command, operator)),
            Err(e) => {
                has_errors = true;
                print_error(&format!("{} -> {}: {}", command, operator, e));
            }
        }
    }

    print_section("Resources");
    for pattern in &descriptor.resources {
        print_info(pattern);
    }
    let bundled = descriptor.bundled_resources(&base_dir)?;
    if bundled.is_empty() {
        print_warning(&format!("No resource files found under {}", base_dir.display()));
    } else if verbose {
        for file in &bundled {
            let relative = file.strip_prefix(&base_dir).unwrap_or(file.as_path());
            print_bullet(&relative.display().to_string());
        }
    }

    let problems = descriptor.check_resources(&registry, &base_dir)?;
    for problem in &problems {
        print_warning(problem);
    }

    println!();
    if has_errors {
        return Err(miette::miette!("Package has unresolved entry points"));
    }

    if problems.is_empty() {
        println!("{}", "Package is consistent!".green().bold());
    } else {
        println!("{}", "Package entry points resolve but resources have warnings.".yellow().bold());
    }
    Ok(())
}
