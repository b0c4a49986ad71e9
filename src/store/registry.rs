// typed-env: Typed environment variable access
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Persistent User/Machine environment tables (Windows registry).
//!
//! ```text
//! User    -> HKCU\Environment
//! Machine -> HKLM\SYSTEM\CurrentControlSet\Control\Session Manager\Environment
//! write   -> RegSetKeyValueW / RegDeleteKeyValueW
//!         -> broadcast WM_SETTINGCHANGE("Environment")
//! ```

use windows::Win32::Foundation::{ERROR_FILE_NOT_FOUND, ERROR_SUCCESS, LPARAM, WIN32_ERROR, WPARAM};
use windows::Win32::System::Registry::{
    HKEY, HKEY_CURRENT_USER, HKEY_LOCAL_MACHINE, REG_SZ, RRF_NOEXPAND, RRF_RT_REG_EXPAND_SZ,
    RRF_RT_REG_SZ, RegDeleteKeyValueW, RegGetValueW, RegSetKeyValueW,
};
use windows::Win32::UI::WindowsAndMessaging::{
    HWND_BROADCAST, SMTO_ABORTIFHUNG, SendMessageTimeoutW, WM_SETTINGCHANGE,
};
use windows::core::{HSTRING, w};

use super::Scope;

const SETTING_CHANGE_TIMEOUT_MS: u32 = 1000;

fn root(scope: Scope) -> (HKEY, HSTRING) {
    match scope {
        Scope::Machine => (
            HKEY_LOCAL_MACHINE,
            HSTRING::from(r"SYSTEM\CurrentControlSet\Control\Session Manager\Environment"),
        ),
        Scope::User | Scope::Process => (HKEY_CURRENT_USER, HSTRING::from("Environment")),
    }
}

fn to_io(err: WIN32_ERROR) -> std::io::Error {
    std::io::Error::from_raw_os_error(err.0.cast_signed())
}

/// Reads a value from the registry table backing `scope`.
pub(super) fn read(name: &str, scope: Scope) -> std::io::Result<Option<String>> {
    let (hkey, subkey) = root(scope);
    let value_name = HSTRING::from(name);
    let flags = RRF_RT_REG_SZ | RRF_RT_REG_EXPAND_SZ | RRF_NOEXPAND;

    let mut byte_len = 0u32;
    // SAFETY: all pointers are valid for the duration of the call; a null data
    // pointer asks only for the required buffer size.
    let status = unsafe {
        RegGetValueW(
            hkey,
            &subkey,
            &value_name,
            flags,
            None,
            None,
            Some(&raw mut byte_len),
        )
    };
    if status == ERROR_FILE_NOT_FOUND {
        return Ok(None);
    }
    if status != ERROR_SUCCESS {
        return Err(to_io(status));
    }

    let mut buffer = vec![0u16; (byte_len as usize).div_ceil(2)];
    // SAFETY: `buffer` holds at least `byte_len` bytes.
    let status = unsafe {
        RegGetValueW(
            hkey,
            &subkey,
            &value_name,
            flags,
            None,
            Some(buffer.as_mut_ptr().cast()),
            Some(&raw mut byte_len),
        )
    };
    if status == ERROR_FILE_NOT_FOUND {
        return Ok(None);
    }
    if status != ERROR_SUCCESS {
        return Err(to_io(status));
    }

    // Returned length includes the terminating NUL.
    let len = (byte_len as usize / 2).saturating_sub(1);
    buffer.truncate(len);
    Ok(Some(String::from_utf16_lossy(&buffer)))
}

/// Writes or deletes a value in the registry table backing `scope`.
pub(super) fn write(name: &str, value: Option<&str>, scope: Scope) -> std::io::Result<()> {
    let (hkey, subkey) = root(scope);
    let value_name = HSTRING::from(name);

    let status = match value {
        Some(value) => {
            let data: Vec<u16> = value.encode_utf16().chain(std::iter::once(0)).collect();
            let byte_len = u32::try_from(data.len() * 2)
                .map_err(|_| std::io::Error::from(std::io::ErrorKind::InvalidInput))?;
            // SAFETY: `data` is a NUL-terminated UTF-16 buffer of `byte_len` bytes.
            unsafe {
                RegSetKeyValueW(
                    hkey,
                    &subkey,
                    &value_name,
                    REG_SZ.0,
                    Some(data.as_ptr().cast()),
                    byte_len,
                )
            }
        }
        None => {
            // SAFETY: both strings are valid NUL-terminated wide strings.
            let status = unsafe { RegDeleteKeyValueW(hkey, &subkey, &value_name) };
            if status == ERROR_FILE_NOT_FOUND {
                ERROR_SUCCESS
            } else {
                status
            }
        }
    };
    if status != ERROR_SUCCESS {
        return Err(to_io(status));
    }

    broadcast_change();
    Ok(())
}

/// Tells top-level windows (Explorer, shells) to reload the environment.
fn broadcast_change() {
    // SAFETY: the lParam points at a static wide string for the whole call.
    unsafe {
        SendMessageTimeoutW(
            HWND_BROADCAST,
            WM_SETTINGCHANGE,
            WPARAM(0),
            LPARAM(w!("Environment").as_ptr() as isize),
            SMTO_ABORTIFHUNG,
            SETTING_CHANGE_TIMEOUT_MS,
            None,
        );
    }
}
